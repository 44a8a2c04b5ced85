#![forbid(unsafe_code)]

//! Deferred structural actions and the animation gate that holds them.
//!
//! Structural changes (adding, removing or selecting tabs, showing or hiding
//! the switcher) must not interleave with a running animation or an active
//! gesture: both read tab positions that the change would invalidate. The
//! switcher therefore pushes every such request onto [`PendingActions`] and
//! drains the queue only while the [`AnimationGate`] is idle.
//!
//! # Invariants
//!
//! 1. Actions are applied in the order they were requested.
//! 2. The gate counter never underflows; an unmatched end is an error.

use std::collections::VecDeque;

use tabstack_core::{Result, TabStackError};
use tabstack_layout::{Tab, TabId};

/// A structural request waiting for the switcher to become idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Insert `tab` at `index`, or append it when `index` is `None`.
    Add { tab: Tab, index: Option<usize> },
    Remove(TabId),
    /// Remove a tab the user swiped away. A no-op once the tab is gone.
    Close(TabId),
    Clear,
    Show,
    Hide,
    Select(TabId),
}

impl PendingAction {
    /// Short name used in log records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove(_) => "remove",
            Self::Close(_) => "close",
            Self::Clear => "clear",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Select(_) => "select",
        }
    }
}

/// FIFO of [`PendingAction`]s.
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    queue: VecDeque<PendingAction>,
}

impl PendingActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: PendingAction) {
        tabstack_core::trace!(
            message = "pending.push",
            action = action.name(),
            depth = self.queue.len() + 1
        );
        self.queue.push_back(action);
    }

    /// Take the oldest action.
    pub fn pop(&mut self) -> Option<PendingAction> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&PendingAction> {
        self.queue.front()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every queued action.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Drop queued swipe closes that `action` makes redundant.
    ///
    /// A removal of the same tab, or a clear, supersedes them.
    pub fn supersede_closes(&mut self, action: &PendingAction) {
        match *action {
            PendingAction::Remove(id) => self
                .queue
                .retain(|queued| *queued != PendingAction::Close(id)),
            PendingAction::Clear => self
                .queue
                .retain(|queued| !matches!(queued, PendingAction::Close(_))),
            _ => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAction> {
        self.queue.iter()
    }
}

/// Counter of renderer animations that are still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationGate {
    running: usize,
}

impl AnimationGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { running: 0 }
    }

    /// Record that an animation started.
    pub fn begin(&mut self) {
        self.running += 1;
        tabstack_core::trace!(message = "animation.gate", running = self.running);
    }

    /// Record that an animation finished.
    ///
    /// # Errors
    /// `IllegalState` if no animation is running.
    pub fn end(&mut self) -> Result<()> {
        let Some(running) = self.running.checked_sub(1) else {
            return Err(TabStackError::illegal_state(
                "animation end reported while no animation is running",
            ));
        };
        self.running = running;
        tabstack_core::trace!(message = "animation.gate", running = self.running);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.running == 0
    }

    #[inline]
    #[must_use]
    pub const fn running(&self) -> usize {
        self.running
    }

    /// Forget every running animation.
    pub fn reset(&mut self) {
        self.running = 0;
    }
}
