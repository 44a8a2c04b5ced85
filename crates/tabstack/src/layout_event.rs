#![forbid(unsafe_code)]

//! Notifications emitted to the renderer.
//!
//! Every processed input returns a `Vec<LayoutEvent>`. The renderer builds its
//! animations by consuming this stream; the engine never calls back into it.
//!
//! # Invariants
//!
//! 1. Every gesture session ends in at most one terminal event: `SwipeEnded`,
//!    `Fling`, `RevertStartOvershoot`, `RevertEndOvershoot` or `Click`.
//! 2. `Click` is never emitted for a release the engine synthesized itself.
//! 3. `SwipeEnded::velocity` is either 0 or at least the configured minimum
//!    swipe velocity in magnitude.
//!
//! # Animations
//!
//! Events for which [`LayoutEvent::starts_animation`] is true hold the
//! pending-action queue until the renderer reports the end of that
//! animation. See [`TabSwitcher`](crate::TabSwitcher) for the contract.

use std::time::Duration;

use tabstack_layout::{SwipeAppearance, TabId, Tag};

/// A notification for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    // --- Gesture outcomes ---
    /// A tap landed on a tab.
    Click { tab: TabId, index: usize },

    /// Continue moving tabs after release. `distance` is signed along the
    /// dragging axis; positive moves toward the end.
    Fling { distance: f32, duration: Duration },

    /// A running fling was stopped.
    CancelFling,

    // --- Overshoot feedback ---
    /// Rubber-band pull at the start edge: draw tab 0 at `position`.
    StartOvershoot { position: f32 },

    /// Animate the start tilt back from `max_angle` to 0.
    RevertStartOvershoot { max_angle: f32 },

    /// Tilt the stack by `angle` degrees at the start edge.
    ///
    /// While tilting, tab 0 occludes the stack: the renderer hides every other
    /// tab and shows them again on the next `StartOvershoot` or
    /// `RevertStartOvershoot`. Their tags do not change.
    TiltOnStartOvershoot { angle: f32 },

    /// Animate the end tilt back from `max_angle` to 0.
    RevertEndOvershoot { max_angle: f32 },

    /// Tilt the stack by `angle` degrees at the end edge.
    TiltOnEndOvershoot { angle: f32 },

    // --- Swipe to close ---
    /// A tab is being swiped `distance` pixels along the orthogonal axis.
    Swipe {
        tab: TabId,
        distance: f32,
        appearance: SwipeAppearance,
    },

    /// A swipe was released. `remove` tells whether the tab is closed.
    SwipeEnded {
        tab: TabId,
        remove: bool,
        velocity: f32,
    },

    // --- Layout ---
    /// The tag of a tab changed.
    ViewStateChanged { tab: TabId, index: usize, tag: Tag },

    // --- Structure ---
    TabAdded {
        tab: TabId,
        index: usize,
        animated: bool,
    },
    TabRemoved {
        tab: TabId,
        index: usize,
        animated: bool,
    },
    AllTabsRemoved { animated: bool },
    SelectionChanged {
        previous: Option<TabId>,
        selected: Option<TabId>,
    },
    SwitcherShown,
    SwitcherHidden,
}

impl LayoutEvent {
    /// Whether the renderer runs an animation for this event and must report
    /// its end before queued actions resume.
    #[must_use]
    pub fn starts_animation(&self) -> bool {
        match self {
            Self::Fling { .. }
            | Self::RevertStartOvershoot { .. }
            | Self::RevertEndOvershoot { .. }
            | Self::SwipeEnded { .. }
            | Self::SwitcherShown
            | Self::SwitcherHidden => true,
            Self::TabAdded { animated, .. }
            | Self::TabRemoved { animated, .. }
            | Self::AllTabsRemoved { animated } => *animated,
            _ => false,
        }
    }

    /// Returns true for the events that end a gesture session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Click { .. }
                | Self::Fling { .. }
                | Self::RevertStartOvershoot { .. }
                | Self::RevertEndOvershoot { .. }
                | Self::SwipeEnded { .. }
        )
    }

    /// The tab this event is about, if any.
    #[must_use]
    pub fn tab(&self) -> Option<TabId> {
        match self {
            Self::Click { tab, .. }
            | Self::Swipe { tab, .. }
            | Self::SwipeEnded { tab, .. }
            | Self::ViewStateChanged { tab, .. }
            | Self::TabAdded { tab, .. }
            | Self::TabRemoved { tab, .. } => Some(*tab),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstack_layout::State;

    #[test]
    fn terminal_events_animate_except_click() {
        let fling = LayoutEvent::Fling {
            distance: 40.0,
            duration: Duration::from_millis(250),
        };
        assert!(fling.is_terminal());
        assert!(fling.starts_animation());
        let click = LayoutEvent::Click {
            tab: TabId(1),
            index: 0,
        };
        assert!(click.is_terminal());
        assert!(!click.starts_animation());
    }

    #[test]
    fn structural_events_animate_only_when_flagged() {
        let shown = LayoutEvent::TabAdded {
            tab: TabId(3),
            index: 0,
            animated: true,
        };
        let hidden = LayoutEvent::TabAdded {
            tab: TabId(3),
            index: 0,
            animated: false,
        };
        assert!(shown.starts_animation());
        assert!(!hidden.starts_animation());
        assert!(!LayoutEvent::AllTabsRemoved { animated: false }.starts_animation());
    }

    #[test]
    fn feedback_events_do_not_animate() {
        let changed = LayoutEvent::ViewStateChanged {
            tab: TabId(2),
            index: 1,
            tag: Tag::new(10.0, State::Floating),
        };
        assert!(!changed.starts_animation());
        assert_eq!(changed.tab(), Some(TabId(2)));
        assert!(!LayoutEvent::TiltOnEndOvershoot { angle: 1.0 }.starts_animation());
        assert_eq!(LayoutEvent::CancelFling.tab(), None);
    }
}
