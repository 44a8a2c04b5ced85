#![forbid(unsafe_code)]

//! Tab identity and per-tab layout state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a tab, independent of its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// A tab owned by the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tab {
    pub id: TabId,
    /// Whether the tab may be swiped away.
    pub closeable: bool,
}

impl Tab {
    /// Create a closeable tab.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id: TabId(id),
            closeable: true,
        }
    }

    /// Set whether the tab may be closed.
    #[must_use]
    pub const fn closeable(mut self, closeable: bool) -> Self {
        self.closeable = closeable;
        self
    }
}

/// Discrete visual state of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum State {
    /// Collapsed into the pile at the start edge, behind the atop tab.
    StackedStart,
    /// Front-most tab of the start pile; the only start-stacked tab that
    /// receives clicks and drags.
    StackedStartAtop,
    /// Positioned freely between the two piles.
    Floating,
    /// Collapsed into the pile at the end edge.
    StackedEnd,
    /// Fully covered by another stacked tab.
    Hidden,
}

impl State {
    /// Returns true for both start-stack states.
    #[must_use]
    pub const fn is_stacked_at_start(self) -> bool {
        matches!(self, Self::StackedStart | Self::StackedStartAtop)
    }

    /// Returns true if the tab is drawn at all.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns true if the tab can be hit by a click or a swipe.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Floating | Self::StackedStartAtop)
    }
}

/// Position and state of one tab, overwritten by every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    /// Signed offset along the dragging axis; 0 is the content origin.
    pub position: f32,
    pub state: State,
    /// Set once the tab has been swiped away and awaits removal.
    pub closing: bool,
}

impl Tag {
    /// Create a tag that is not closing.
    #[must_use]
    pub const fn new(position: f32, state: State) -> Self {
        Self {
            position,
            state,
            closing: false,
        }
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::new(0.0, State::Hidden)
    }
}
