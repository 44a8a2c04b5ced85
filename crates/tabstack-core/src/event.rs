#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! Platform input (touch, mouse, pen) is normalized into [`PointerEvent`]
//! values before it reaches the drag handler. Coordinates are raw screen
//! pixels; the viewport projects them onto the dragging axis.

use std::time::Duration;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The pointer touched down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// The platform aborted the pointer sequence.
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
    pub pointer_id: u32,
    /// Monotonic time of the sample, relative to an arbitrary origin.
    pub timestamp: Duration,
}

impl PointerEvent {
    /// Create a pointer event for the primary pointer (id 0).
    #[must_use]
    pub const fn new(action: PointerAction, x: f32, y: f32, timestamp: Duration) -> Self {
        Self {
            action,
            x,
            y,
            pointer_id: 0,
            timestamp,
        }
    }

    /// Create a pointer-down event.
    #[must_use]
    pub const fn down(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerAction::Down, x, y, timestamp)
    }

    /// Create a pointer-move event.
    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerAction::Move, x, y, timestamp)
    }

    /// Create a pointer-up event.
    #[must_use]
    pub const fn up(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerAction::Up, x, y, timestamp)
    }

    /// Create a pointer-cancel event.
    #[must_use]
    pub const fn cancel(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerAction::Cancel, x, y, timestamp)
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true for events that end a pointer sequence.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }
}
