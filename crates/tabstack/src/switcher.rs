#![forbid(unsafe_code)]

//! The tab switcher facade.
//!
//! [`TabSwitcher`] ties the pieces together: it owns the [`TabStack`], the
//! [`StackingLayout`] rules, the [`DragHandler`], the [`PendingActions`] queue
//! and the [`AnimationGate`]. Callers feed it pointer events, structural
//! requests and animation callbacks; every call returns the renderer events it
//! produced.
//!
//! # Animation contract
//!
//! Every returned event whose [`LayoutEvent::starts_animation`] is true holds
//! the gate. The renderer closes that slot with [`TabSwitcher::on_animation_end`]
//! once the animation finishes, with one exception: a `Fling` slot is closed
//! by [`TabSwitcher::end_fling`] when the fling runs out, or by the switcher
//! itself when it emits `CancelFling`.
//!
//! Structural requests are queued and applied one at a time, only while the
//! gate is idle and no pointer is down.
//!
//! A swipe that removes a tab queues a [`PendingAction::Close`]. A later
//! `remove_tab` of that tab or `clear_tabs` supersedes it, and a close whose
//! tab is already gone does nothing, so a swipe never surfaces an error.
//!
//! # Errors
//!
//! A failing call returns `Err` but never drops events: anything produced
//! before the failure stays buffered and is returned by the next call (or by
//! [`TabSwitcher::take_events`]).

use tabstack_core::config::StackConfig;
use tabstack_core::event::PointerEvent;
use tabstack_core::geometry::Viewport;
use tabstack_core::Result;
use tabstack_layout::{PassOutcome, StackingLayout, Tab, TabId, TabStack};

use crate::drag_handler::{DragHandler, DragState};
use crate::layout_event::LayoutEvent;
use crate::pending::{AnimationGate, PendingAction, PendingActions};

/// A card-stack tab switcher.
#[derive(Debug)]
pub struct TabSwitcher {
    layout: StackingLayout,
    stack: TabStack,
    handler: DragHandler,
    pending: PendingActions,
    gate: AnimationGate,
    shown: bool,
    outbox: Vec<LayoutEvent>,
}

impl TabSwitcher {
    /// Create a hidden switcher without tabs.
    ///
    /// # Errors
    /// Whatever [`StackingLayout::new`] rejects about `config` and
    /// `viewport`.
    pub fn new(config: StackConfig, viewport: Viewport) -> Result<Self> {
        Ok(Self {
            layout: StackingLayout::new(config, viewport)?,
            stack: TabStack::new(),
            handler: DragHandler::new(),
            pending: PendingActions::new(),
            gate: AnimationGate::new(),
            shown: false,
            outbox: Vec::new(),
        })
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &StackingLayout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn stack(&self) -> &TabStack {
        &self.stack
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        self.layout.config()
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.layout.viewport()
    }

    #[inline]
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.handler.drag_state()
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> &DragHandler {
        &self.handler
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    #[inline]
    #[must_use]
    pub fn gate(&self) -> &AnimationGate {
        &self.gate
    }

    /// Whether no animation runs and no pointer is down.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gate.is_idle() && self.handler.session().is_none()
    }

    /// Take every buffered event.
    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.outbox)
    }

    // --- Structural requests ---

    /// Append a tab.
    pub fn add_tab(&mut self, tab: Tab) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Add { tab, index: None })
    }

    /// Insert a tab at `index`.
    pub fn insert_tab(&mut self, index: usize, tab: Tab) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Add {
            tab,
            index: Some(index),
        })
    }

    pub fn remove_tab(&mut self, id: TabId) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Remove(id))
    }

    pub fn clear_tabs(&mut self) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Clear)
    }

    pub fn show(&mut self) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Show)
    }

    pub fn hide(&mut self) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Hide)
    }

    pub fn select_tab(&mut self, id: TabId) -> Result<Vec<LayoutEvent>> {
        self.request(PendingAction::Select(id))
    }

    fn request(&mut self, action: PendingAction) -> Result<Vec<LayoutEvent>> {
        self.pending.supersede_closes(&action);
        self.pending.push(action);
        self.drain()?;
        Ok(self.take_events())
    }

    // --- Input ---

    /// Feed one pointer event. Ignored while the switcher is hidden.
    ///
    /// # Errors
    /// `InvalidArgument` for non-finite coordinates.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> Result<Vec<LayoutEvent>> {
        if self.shown {
            let events = self.handler.handle(&self.layout, &mut self.stack, event)?;
            self.absorb(events)?;
            self.drain()?;
        }
        Ok(self.take_events())
    }

    /// Advance a running fling by `distance` pixels.
    pub fn fling_step(&mut self, distance: f32) -> Result<Vec<LayoutEvent>> {
        let events = self.handler.fling_step(&self.layout, &mut self.stack, distance);
        self.absorb(events)?;
        self.drain()?;
        Ok(self.take_events())
    }

    /// Report that the running fling animation finished.
    ///
    /// # Errors
    /// `IllegalState` if the fling slot was already closed.
    pub fn end_fling(&mut self) -> Result<Vec<LayoutEvent>> {
        if self.handler.end_fling() {
            self.gate.end()?;
        }
        self.drain()?;
        Ok(self.take_events())
    }

    /// Stop a running fling and end any active gesture.
    pub fn cancel_fling(&mut self) -> Result<Vec<LayoutEvent>> {
        let events = self.handler.cancel_fling(&self.layout, &mut self.stack);
        self.absorb(events)?;
        self.drain()?;
        Ok(self.take_events())
    }

    /// Report that one renderer animation finished.
    ///
    /// # Errors
    /// `IllegalState` if no animation is running.
    pub fn on_animation_end(&mut self) -> Result<Vec<LayoutEvent>> {
        self.gate.end()?;
        self.drain()?;
        Ok(self.take_events())
    }

    /// Replace the viewport, e.g. after an orientation change.
    ///
    /// Any gesture or fling in progress is dropped, and a shown switcher is
    /// laid out again from the selected tab.
    ///
    /// # Errors
    /// Whatever [`StackingLayout::new`] rejects about `viewport`; the old
    /// layout stays in place.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<Vec<LayoutEvent>> {
        let layout = StackingLayout::new(self.layout.config().clone(), viewport)?;
        tabstack_core::debug!(
            message = "switcher.viewport",
            available = layout.viewport().available_extent()
        );
        self.layout = layout;
        if self.handler.end_fling() {
            self.outbox.push(LayoutEvent::CancelFling);
            self.gate.end()?;
        }
        self.handler.reset();
        if self.shown {
            let outcome = self.layout.initial_layout(&mut self.stack);
            self.push_changes(&outcome);
        }
        self.drain()?;
        Ok(self.take_events())
    }
}

// ---------------------------------------------------------------------------
// Queue draining
// ---------------------------------------------------------------------------

impl TabSwitcher {
    fn absorb(&mut self, events: Vec<LayoutEvent>) -> Result<()> {
        for event in events {
            match event {
                LayoutEvent::SwipeEnded {
                    tab, remove: true, ..
                } => {
                    if let Some(tag) = self
                        .stack
                        .index_of(tab)
                        .and_then(|index| self.stack.tag_mut(index))
                        .filter(|tag| !tag.closing)
                    {
                        tag.closing = true;
                        self.pending.push(PendingAction::Close(tab));
                    }
                }
                LayoutEvent::CancelFling => self.gate.end()?,
                _ => {}
            }
            self.emit(event);
        }
        Ok(())
    }

    fn emit(&mut self, event: LayoutEvent) {
        if event.starts_animation() {
            self.gate.begin();
        }
        self.outbox.push(event);
    }

    fn push_changes(&mut self, outcome: &PassOutcome) {
        for &index in &outcome.changed {
            if let (Some(tab), Some(tag)) = (self.stack.tab(index), self.stack.tag(index)) {
                self.outbox.push(LayoutEvent::ViewStateChanged {
                    tab: tab.id,
                    index,
                    tag: *tag,
                });
            }
        }
    }

    /// Apply queued actions while nothing holds the gate.
    ///
    /// An action that fails is dropped; later actions stay queued.
    fn drain(&mut self) -> Result<()> {
        while self.is_idle() {
            let Some(action) = self.pending.pop() else {
                break;
            };
            tabstack_core::debug!(
                message = "pending.drain",
                action = action.name(),
                remaining = self.pending.len()
            );
            self.apply(action)?;
        }
        Ok(())
    }

    fn apply(&mut self, action: PendingAction) -> Result<()> {
        let previous = self.selected_id();
        match action {
            PendingAction::Add { tab, index } => {
                let index = index.unwrap_or(self.stack.len());
                self.stack.insert(index, tab)?;
                self.emit(LayoutEvent::TabAdded {
                    tab: tab.id,
                    index,
                    animated: self.shown,
                });
                self.relayout(index);
            }
            PendingAction::Remove(id) => self.remove(id)?,
            PendingAction::Close(id) => {
                if self.stack.index_of(id).is_some() {
                    self.remove(id)?;
                } else {
                    tabstack_core::debug!(message = "pending.stale", action = "close", tab = %id);
                }
            }
            PendingAction::Clear => {
                self.stack.clear();
                self.emit(LayoutEvent::AllTabsRemoved {
                    animated: self.shown,
                });
            }
            PendingAction::Show => {
                if !self.shown {
                    self.shown = true;
                    let outcome = self.layout.initial_layout(&mut self.stack);
                    self.push_changes(&outcome);
                    self.emit(LayoutEvent::SwitcherShown);
                }
            }
            PendingAction::Hide => {
                if self.shown {
                    self.shown = false;
                    self.handler.reset();
                    self.emit(LayoutEvent::SwitcherHidden);
                }
            }
            PendingAction::Select(id) => {
                self.stack.select(id)?;
            }
        }
        let selected = self.selected_id();
        if selected != previous {
            self.emit(LayoutEvent::SelectionChanged { previous, selected });
        }
        Ok(())
    }

    fn remove(&mut self, id: TabId) -> Result<()> {
        let (index, tab) = self.stack.remove(id)?;
        self.emit(LayoutEvent::TabRemoved {
            tab: tab.id,
            index,
            animated: self.shown,
        });
        self.relayout(index);
        Ok(())
    }

    fn relayout(&mut self, index: usize) {
        if self.shown && !self.stack.is_empty() {
            let outcome = self.layout.relayout_from(&mut self.stack, index);
            self.push_changes(&outcome);
        }
    }

    fn selected_id(&self) -> Option<TabId> {
        self.stack.selected_tab().map(|tab| tab.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
