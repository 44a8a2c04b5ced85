#![forbid(unsafe_code)]

//! Pure stacking rules.
//!
//! Positions are measured from the content origin along the dragging axis.
//! Tab 0 rests farthest from the origin; each later tab sits closer to it, so
//! the *start stack* near 0 collects the highest indices and the *end stack*
//! near [`Viewport::available_extent`] collects the lowest ones.
//!
//! ```text
//! 0                         attached                       available
//! |[n-1][n-2][n-3]  ..  [3]    [2]      [1]        [0]|          |
//! |<- start stack ->|<------- floating ------->|<- end stack ->|
//! ```
//!
//! [`StackingLayout::clip`] is the single authority that turns a raw position
//! into a [`Tag`]. Layout passes compute raw positions; they never assign a
//! state themselves.
//!
//! # Invariants
//!
//! 1. `clip` is idempotent: clipping a clipped position yields the same tag.
//! 2. A tab whose predecessor sits in the start stack is itself start-stacked.
//! 3. No tab is clipped above its fully spread resting position
//!    ([`StackingLayout::end_position`]), so the last tab always rests at 0.
//! 4. The two stacks never overlap: `available_extent` exceeds twice the
//!    height of a full stack.

use tabstack_core::config::StackConfig;
use tabstack_core::geometry::Viewport;
use tabstack_core::{Result, TabStackError};

use crate::tab::{State, Tag};

/// Spacing between a tab and its successor inside the floating region.
///
/// Spacing shrinks linearly from `max_spacing` at or above `attached` down to
/// `min_spacing` at the origin, which compresses tabs like an accordion as
/// they approach the start stack.
///
/// ```
/// use tabstack_layout::non_linear_spacing;
///
/// assert_eq!(non_linear_spacing(400.0, 200.0, 100.0, 40.0), 100.0);
/// assert_eq!(non_linear_spacing(100.0, 200.0, 100.0, 40.0), 70.0);
/// assert_eq!(non_linear_spacing(0.0, 200.0, 100.0, 40.0), 40.0);
/// ```
#[must_use]
pub fn non_linear_spacing(
    predecessor_position: f32,
    attached_position: f32,
    max_spacing: f32,
    min_spacing: f32,
) -> f32 {
    let ratio = if attached_position > 0.0 {
        (predecessor_position / attached_position).clamp(0.0, 1.0)
    } else {
        1.0
    };
    min_spacing + ratio * (max_spacing - min_spacing)
}

/// Feedback for dragging past the first tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overshoot {
    /// Rubber-band pull: tab 0 is drawn at this position.
    Pull(f32),
    /// Tilt the whole stack by this angle, in degrees.
    ///
    /// Tab 0 now occludes the rest of the stack: every other tab is hidden
    /// until the feedback returns to [`Overshoot::Pull`] or is reverted. Tags
    /// are left untouched; hiding is up to the renderer.
    Tilt(f32),
}

/// Visual treatment of a tab being swiped along the orthogonal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeAppearance {
    /// Swiped fraction of the orthogonal extent, in `[0, 1]`.
    pub ratio: f32,
    pub alpha: f32,
    pub scale: f32,
}

// ---------------------------------------------------------------------------
// StackingLayout
// ---------------------------------------------------------------------------

/// Stacking rules bound to one config and viewport.
#[derive(Debug, Clone)]
pub struct StackingLayout {
    config: StackConfig,
    viewport: Viewport,
    max_spacing: f32,
    min_spacing: f32,
}

impl StackingLayout {
    /// Bind the stacking rules to `config` and `viewport`.
    ///
    /// # Errors
    /// - `Config` if the config fails validation.
    /// - `IllegalState` if no maximum tab spacing is configured.
    /// - `InvalidArgument` if the viewport is unusable or too small to hold
    ///   both stacks.
    pub fn new(config: StackConfig, viewport: Viewport) -> Result<Self> {
        let config = config.validated()?;
        let max_spacing = config.max_tab_spacing()?;
        let min_spacing = config.min_tab_spacing()?;
        viewport.validate()?;
        let stacks = 2.0 * config.stacked_tab_spacing * config.stacked_tab_count as f32;
        if viewport.available_extent() <= stacks {
            return Err(TabStackError::invalid(format!(
                "available extent {} cannot hold both stacks ({stacks})",
                viewport.available_extent()
            )));
        }
        Ok(Self {
            config,
            viewport,
            max_spacing,
            min_spacing,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    #[must_use]
    pub fn max_spacing(&self) -> f32 {
        self.max_spacing
    }

    #[inline]
    #[must_use]
    pub fn min_spacing(&self) -> f32 {
        self.min_spacing
    }

    #[inline]
    #[must_use]
    pub fn attached_position(&self) -> f32 {
        self.viewport.attached_position()
    }

    /// Height of a full stack: the offset of its hidden tabs.
    #[must_use]
    pub fn stack_extent(&self) -> f32 {
        self.config.stacked_tab_spacing * self.config.stacked_tab_count as f32
    }

    // --- Stacks ---

    /// Position and state of tab `index` collapsed into the start stack.
    #[must_use]
    pub fn stacked_at_start(&self, index: usize, count: usize, predecessor: Option<&Tag>) -> Tag {
        let spacing = self.config.stacked_tab_spacing;
        let depth = count.saturating_sub(index);
        let atop = self.promotes_atop(predecessor);
        if depth <= self.config.stacked_tab_count {
            let position = spacing * depth.saturating_sub(1) as f32;
            let state = if atop {
                State::StackedStartAtop
            } else {
                State::StackedStart
            };
            Tag::new(position, state)
        } else {
            let state = if atop {
                State::StackedStartAtop
            } else {
                State::Hidden
            };
            Tag::new(self.stack_extent(), state)
        }
    }

    /// Position and state of tab `index` collapsed into the end stack.
    #[must_use]
    pub fn stacked_at_end(&self, index: usize) -> Tag {
        let base = self.viewport.available_extent();
        let spacing = self.config.stacked_tab_spacing;
        if index < self.config.stacked_tab_count {
            Tag::new(base - spacing * (index + 1) as f32, State::StackedEnd)
        } else {
            Tag::new(base - self.stack_extent(), State::Hidden)
        }
    }

    /// Resting position of tab `index` when every tab is fully spread.
    ///
    /// No raw position may exceed it.
    #[must_use]
    pub fn end_position(&self, index: usize, count: usize) -> f32 {
        count.saturating_sub(index + 1) as f32 * self.max_spacing
    }

    /// Raw position of the tab following one at `predecessor_position`.
    #[must_use]
    pub fn successor_position(&self, predecessor_position: f32) -> f32 {
        predecessor_position
            - non_linear_spacing(
                predecessor_position,
                self.attached_position(),
                self.max_spacing,
                self.min_spacing,
            )
    }

    /// Whether `tag` belongs to the start stack, counting tabs hidden behind it.
    #[must_use]
    pub fn is_start_side(&self, tag: &Tag) -> bool {
        match tag.state {
            State::StackedStart | State::StackedStartAtop => true,
            State::Hidden => tag.position <= self.stack_extent(),
            State::Floating | State::StackedEnd => false,
        }
    }

    /// Whether a tab following `predecessor` becomes the front of the start
    /// stack when it is stacked.
    #[must_use]
    pub fn promotes_atop(&self, predecessor: Option<&Tag>) -> bool {
        predecessor.is_none_or(|tag| !self.is_start_side(tag))
    }

    // --- Clip ---

    /// Turn a raw position into the tag of tab `index`.
    ///
    /// Positions at or below the start-stack slot of the tab snap into the
    /// start stack, positions at or above its end-stack slot snap into the
    /// end stack, and everything in between floats unchanged.
    #[must_use]
    pub fn clip(&self, index: usize, count: usize, raw: f32, predecessor: Option<&Tag>) -> Tag {
        let raw = raw.min(self.end_position(index, count));
        let start = self.stacked_at_start(index, count, predecessor);
        if raw <= start.position || predecessor.is_some_and(|tag| self.is_start_side(tag)) {
            return start;
        }
        let end = self.stacked_at_end(index);
        if raw >= end.position {
            return end;
        }
        Tag::new(raw, State::Floating)
    }

    // --- Feedback ---

    /// Feedback for dragging `distance` pixels past the start boundary while
    /// tab 0 rests at `first_position`.
    #[must_use]
    pub fn start_overshoot(&self, distance: f32, first_position: f32) -> Overshoot {
        let max = self.config.max_overshoot_distance;
        let distance = distance.abs();
        if distance <= max {
            Overshoot::Pull(first_position * (1.0 - distance / max))
        } else {
            let ratio = ((distance - max) / max).min(1.0);
            Overshoot::Tilt(ratio * self.config.max_start_overshoot_angle)
        }
    }

    /// Tilt angle for dragging `distance` pixels past the end boundary.
    #[must_use]
    pub fn end_overshoot_angle(&self, distance: f32) -> f32 {
        let ratio = (distance.abs() / self.config.max_overshoot_distance).min(1.0);
        ratio * self.config.max_end_overshoot_angle
    }

    /// Appearance of a tab swiped `distance` pixels along the orthogonal axis.
    #[must_use]
    pub fn swipe_appearance(&self, distance: f32) -> SwipeAppearance {
        let extent = self.viewport.orthogonal_extent();
        let ratio = if extent > 0.0 {
            (distance.abs() / extent).min(1.0)
        } else {
            0.0
        };
        SwipeAppearance {
            ratio,
            alpha: 1.0 - ratio * (1.0 - self.config.swiped_tab_alpha),
            scale: 1.0 - ratio * (1.0 - self.config.swiped_tab_scale),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
