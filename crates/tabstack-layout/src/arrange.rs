#![forbid(unsafe_code)]

//! Layout passes over a [`TabStack`].
//!
//! Each pass computes raw positions for a run of tabs, hands them to
//! [`StackingLayout::clip`], and writes the resulting tags back. Passes walk
//! tabs in ascending index order so every tab is clipped against its
//! predecessor's already-updated tag.
//!
//! | Pass | Raw position of a tab |
//! |------|-----------------------|
//! | [`drag_to_end`] | leading floating tab moves by the drag delta; followers are pulled out of the start stack once their predecessor leaves enough room |
//! | [`drag_to_start`] | leading floating tabs move by the drag delta; followers below the attached position are compressed; end-stacked tabs are pulled back out behind the first floating tab |
//! | [`initial_layout`] | selected tab at the attached position, predecessors at full spacing, successors at accordion spacing |
//! | [`relayout_from`] | tabs from the changed index onward respaced from their predecessor |
//!
//! [`drag_to_end`]: StackingLayout::drag_to_end
//! [`drag_to_start`]: StackingLayout::drag_to_start
//! [`initial_layout`]: StackingLayout::initial_layout
//! [`relayout_from`]: StackingLayout::relayout_from

use crate::iter::ItemIter;
use crate::model::TabStack;
use crate::stacking::StackingLayout;
use crate::tab::{State, Tag};

/// Result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassOutcome {
    /// Indices whose tag changed, in the order they were written.
    pub changed: Vec<usize>,
    /// First tab that is drawn at all after the pass.
    pub first_visible: Option<usize>,
    /// Whether the layout can move no further in the pass direction.
    pub overshoot: bool,
}

impl PassOutcome {
    /// Returns true if no tag changed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

impl StackingLayout {
    // --- Queries ---

    /// Index of the first tab that is not hidden.
    #[must_use]
    pub fn first_visible_index(&self, stack: &TabStack) -> Option<usize> {
        stack.items().find(|item| item.tag.state.is_visible()).map(|item| item.index)
    }

    /// Whether dragging further toward the end would move nothing.
    ///
    /// True for a single tab, or once the second-to-last tab has spread a
    /// full spacing away from the last one.
    #[must_use]
    pub fn is_overshooting_at_end(&self, stack: &TabStack) -> bool {
        let count = stack.len();
        count <= 1
            || stack
                .tag(count - 2)
                .is_some_and(|tag| tag.position >= self.max_spacing())
    }

    /// Whether dragging further toward the start would move nothing.
    ///
    /// True for a single tab, or once tab 0 is the front of the start stack.
    #[must_use]
    pub fn is_overshooting_at_start(&self, stack: &TabStack) -> bool {
        stack.len() <= 1
            || stack
                .tag(0)
                .is_some_and(|tag| tag.state == State::StackedStartAtop)
    }

    /// Index of the interactive tab under dragging-axis coordinate `axis`.
    ///
    /// Lower indices are drawn over higher ones, so the first floating or
    /// atop tab whose leading edge lies at or before `axis` wins.
    #[must_use]
    pub fn focused_tab(&self, stack: &TabStack, axis: f32) -> Option<usize> {
        let offset = axis - self.viewport().content_origin();
        stack
            .items()
            .filter(|item| item.tag.state.is_interactive())
            .find(|item| item.tag.position <= offset)
            .map(|item| item.index)
    }

    fn is_end_side(&self, tag: &Tag) -> bool {
        matches!(tag.state, State::StackedEnd | State::Hidden) && !self.is_start_side(tag)
    }

    /// Write `tag` at `index`, keeping the closing flag. Returns whether the
    /// stored tag changed.
    fn settle(&self, stack: &mut TabStack, index: usize, tag: Tag, changed: &mut Vec<usize>) -> bool {
        let closing = stack.tag(index).is_some_and(|current| current.closing);
        let updated = stack.set_tag(index, Tag { closing, ..tag });
        if updated {
            changed.push(index);
        }
        updated
    }

    fn outcome(&self, stack: &TabStack, changed: Vec<usize>, overshoot: bool) -> PassOutcome {
        let outcome = PassOutcome {
            changed,
            first_visible: self.first_visible_index(stack),
            overshoot,
        };
        tabstack_core::trace!(
            message = "layout.pass",
            changed = outcome.changed.len(),
            first_visible = ?outcome.first_visible,
            overshoot = outcome.overshoot
        );
        outcome
    }

    // --- Drag passes ---

    /// Move tabs `delta` (> 0) pixels toward the end.
    ///
    /// The walk starts at `from` (the cached first visible index) and stops
    /// early at the first tab that stays put behind the start stack. A zero
    /// delta changes nothing.
    pub fn drag_to_end(&self, stack: &mut TabStack, from: Option<usize>, delta: f32) -> PassOutcome {
        let count = stack.len();
        let mut changed = Vec::new();
        if delta != 0.0 && count > 0 {
            let start = from
                .or_else(|| self.first_visible_index(stack))
                .unwrap_or(0);
            let iter = ItemIter::new(count).start(start);
            for index in iter.clone() {
                let Some(current) = stack.tag(index).copied() else {
                    break;
                };
                let predecessor = iter.neighbor_of(index).and_then(|p| stack.tag(p)).copied();
                let pred = predecessor.as_ref();
                let end = self.end_position(index, count);

                let raw = if index + 1 == count {
                    current.position
                } else {
                    match pred {
                        Some(p) if p.state == State::Floating => {
                            current.position.max(self.successor_position(p.position))
                        }
                        _ if matches!(
                            current.state,
                            State::Floating | State::StackedStartAtop
                        ) =>
                        {
                            current.position + delta
                        }
                        _ => current.position,
                    }
                };
                let tag = self.clip(index, count, raw.min(end), pred);
                let updated = self.settle(stack, index, tag, &mut changed);
                if !updated
                    && matches!(tag.state, State::StackedStart | State::Hidden)
                    && self.is_start_side(&tag)
                {
                    break;
                }
            }
        }
        let overshoot = self.is_overshooting_at_end(stack);
        self.outcome(stack, changed, overshoot)
    }

    /// Move tabs `delta` (< 0) pixels toward the start.
    ///
    /// After the ascending walk, end-stacked tabs directly behind the first
    /// floating tab are pulled back out at full spacing. A zero delta changes
    /// nothing.
    pub fn drag_to_start(&self, stack: &mut TabStack, from: Option<usize>, delta: f32) -> PassOutcome {
        let count = stack.len();
        let mut changed = Vec::new();
        if delta != 0.0 && count > 0 {
            let start = from
                .or_else(|| self.first_visible_index(stack))
                .unwrap_or(0);
            let attached = self.attached_position();
            let iter = ItemIter::new(count).start(start);
            for index in iter.clone() {
                let Some(current) = stack.tag(index).copied() else {
                    break;
                };
                let predecessor = iter.neighbor_of(index).and_then(|p| stack.tag(p)).copied();
                let pred = predecessor.as_ref();

                // Followers below the attached position are compressed
                // behind their floating predecessor.
                if let Some(p) =
                    pred.filter(|p| p.state == State::Floating && p.position < attached)
                {
                    let raw = current.position.min(self.successor_position(p.position));
                    let tag = self.clip(index, count, raw, pred);
                    self.settle(stack, index, tag, &mut changed);
                    continue;
                }
                match current.state {
                    State::Floating => {
                        let tag = self.clip(index, count, current.position + delta, pred);
                        self.settle(stack, index, tag, &mut changed);
                    }
                    State::StackedStartAtop => {
                        let tag = self.clip(index, count, current.position, pred);
                        self.settle(stack, index, tag, &mut changed);
                        break;
                    }
                    State::StackedEnd => {}
                    State::Hidden if !self.is_start_side(&current) => {}
                    State::StackedStart | State::Hidden => break,
                }
            }
            self.pull_out_of_end_stack(stack, &mut changed);
        }
        let overshoot = self.is_overshooting_at_start(stack);
        self.outcome(stack, changed, overshoot)
    }

    /// Descending fix-up behind the first floating tab.
    fn pull_out_of_end_stack(&self, stack: &mut TabStack, changed: &mut Vec<usize>) {
        let count = stack.len();
        let Some(first_floating) = stack
            .items()
            .find(|item| item.tag.state == State::Floating)
            .map(|item| item.index)
        else {
            return;
        };
        let iter = ItemIter::new(count).reverse(true).start(first_floating);
        for index in iter.skip(1) {
            let (Some(current), Some(successor)) =
                (stack.tag(index).copied(), stack.tag(index + 1).copied())
            else {
                break;
            };
            if successor.state != State::Floating || !self.is_end_side(&current) {
                break;
            }
            let predecessor = index.checked_sub(1).and_then(|p| stack.tag(p)).copied();
            let raw = successor.position + self.max_spacing();
            let tag = self.clip(index, count, raw, predecessor.as_ref());
            self.settle(stack, index, tag, changed);
            if self.is_end_side(&tag) {
                break;
            }
        }
    }

    // --- Structural passes ---

    /// Lay out every tab around the selected one.
    ///
    /// The selected tab is anchored at the attached position, tabs before it
    /// are spread at maximum spacing and tabs after it at accordion spacing.
    pub fn initial_layout(&self, stack: &mut TabStack) -> PassOutcome {
        let count = stack.len();
        let mut changed = Vec::new();
        if count > 0 {
            let selected = stack.selected_index().unwrap_or(0).min(count - 1);
            let mut raw = vec![0.0f32; count];
            raw[selected] = self
                .attached_position()
                .min(self.end_position(selected, count));
            for index in (0..selected).rev() {
                raw[index] = raw[index + 1] + self.max_spacing();
            }
            for index in selected + 1..count {
                raw[index] = self.successor_position(raw[index - 1]);
            }
            for (index, position) in raw.into_iter().enumerate() {
                let predecessor = index.checked_sub(1).and_then(|p| stack.tag(p)).copied();
                let tag = self.clip(index, count, position, predecessor.as_ref());
                self.settle(stack, index, tag, &mut changed);
            }
        }
        tabstack_core::debug!(message = "layout.initial", tabs = count, changed = changed.len());
        self.outcome(stack, changed, false)
    }

    /// Re-settle the layout after a tab was inserted at or removed from
    /// `index`.
    ///
    /// Tabs before `index` keep their positions and are only re-clipped for
    /// the new tab count. From `index` on, each tab is respaced from its
    /// predecessor; tabs that are already stacked at the same edge as their
    /// predecessor stay in that stack.
    pub fn relayout_from(&self, stack: &mut TabStack, index: usize) -> PassOutcome {
        let count = stack.len();
        let mut changed = Vec::new();
        for i in 0..count {
            let Some(current) = stack.tag(i).copied() else {
                break;
            };
            let predecessor = i.checked_sub(1).and_then(|p| stack.tag(p)).copied();
            let raw = if i < index {
                current.position
            } else {
                match predecessor.as_ref() {
                    None => stack
                        .tag(1)
                        .map_or(0.0, |next| next.position + self.max_spacing()),
                    Some(p) if self.is_start_side(p) => current.position,
                    Some(p) if self.is_end_side(p) && self.is_end_side(&current) => {
                        current.position
                    }
                    Some(p) => self.successor_position(p.position),
                }
            };
            let tag = self.clip(i, count, raw, predecessor.as_ref());
            self.settle(stack, i, tag, &mut changed);
        }
        self.outcome(stack, changed, false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
