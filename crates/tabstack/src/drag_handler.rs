#![forbid(unsafe_code)]

//! Drag handler: turns pointer events into layout passes and renderer events.
//!
//! [`DragHandler`] owns at most one [`GestureSession`], created on pointer
//! down and dropped on release. Every move is routed to one of three
//! behaviors:
//!
//! - **Overshoot**: the pointer is past a recorded boundary threshold. Tabs do
//!   not move; the handler emits pull or tilt feedback instead.
//! - **Swipe**: the orthogonal threshold was crossed first over a closeable
//!   tab that is not already closing. Only that tab's orthogonal offset
//!   changes for the rest of the gesture.
//! - **Drag**: the dragging-axis threshold was crossed. The layout engine runs
//!   a pass in the direction of movement.
//!
//! # State Machine
//!
//! ```text
//!            threshold crossed, sign of movement
//!   None ──────────────────────────────────────▶ DragToEnd / DragToStart
//!   DragToEnd   ── pass reports overshoot ──▶ OvershootEnd
//!   DragToStart ── pass reports overshoot ──▶ OvershootStart
//!   OvershootEnd   ── pointer back below threshold ──▶ DragToStart
//!   OvershootStart ── pointer back above threshold ──▶ DragToEnd
//!   any ── release / cancel ──▶ (session dropped)
//! ```
//!
//! # Invariants
//!
//! 1. A session never outlives one pointer sequence.
//! 2. Release emits at most one of `SwipeEnded`, `Fling`, `Revert*Overshoot`
//!    or `Click`, in that priority order.
//! 3. A release forced by a pointer anomaly never emits `Click`.
//! 4. Overshoot thresholds are `±∞` whenever the last pass did not overshoot.
//!
//! # Failure Modes
//!
//! - A second pointer down, or a move or up with a different pointer id,
//!   forces the release path and then starts over with the new pointer.
//! - Non-finite coordinates are rejected with `InvalidArgument`; the session is
//!   left untouched.

use std::time::Duration;

use tabstack_core::config::{FLING_DISTANCE_RATIO, SWIPE_REMOVAL_RATIO, StackConfig};
use tabstack_core::event::{PointerAction, PointerEvent};
use tabstack_core::geometry::AxisPoint;
use tabstack_core::gesture::{Component, DragTracker, VelocityTracker};
use tabstack_core::{Result, TabStackError};
use tabstack_layout::{Overshoot, PassOutcome, StackingLayout, TabId, TabStack};

use crate::layout_event::LayoutEvent;

// ---------------------------------------------------------------------------
// DragState
// ---------------------------------------------------------------------------

/// Drag phase of a gesture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// No drag threshold crossed yet.
    #[default]
    None,
    DragToStart,
    DragToEnd,
    /// Pointer is past the start boundary.
    OvershootStart,
    /// Pointer is past the end boundary.
    OvershootEnd,
}

impl DragState {
    /// Returns true while tabs follow the pointer.
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::DragToStart | Self::DragToEnd)
    }

    /// Returns true while overshoot feedback replaces tab movement.
    #[must_use]
    pub const fn is_overshooting(self) -> bool {
        matches!(self, Self::OvershootStart | Self::OvershootEnd)
    }
}

// ---------------------------------------------------------------------------
// GestureSession
// ---------------------------------------------------------------------------

/// State of one pointer sequence, from down to release.
#[derive(Debug, Clone)]
pub struct GestureSession {
    pointer_id: u32,
    drag_state: DragState,
    drag: DragTracker,
    swipe: DragTracker,
    velocity: VelocityTracker,
    start_overshoot_threshold: f32,
    end_overshoot_threshold: f32,
    swiped_tab: Option<TabId>,
    first_visible: Option<usize>,
    last_axis: f32,
    attached_position: f32,
}

impl GestureSession {
    fn begin(
        layout: &StackingLayout,
        stack: &TabStack,
        event: &PointerEvent,
        point: AxisPoint,
    ) -> Self {
        let config = layout.config();
        let mut drag = DragTracker::new(config.drag_threshold);
        let mut swipe = DragTracker::new(config.swipe_threshold);
        drag.update(point.axis);
        swipe.update(point.orthogonal);
        let mut velocity = VelocityTracker::new(Duration::from_millis(config.velocity_horizon_ms));
        velocity.add(event.timestamp, point);
        tabstack_core::trace!(
            message = "drag.begin",
            pointer = event.pointer_id,
            axis = point.axis
        );
        Self {
            pointer_id: event.pointer_id,
            drag_state: DragState::None,
            drag,
            swipe,
            velocity,
            start_overshoot_threshold: f32::NEG_INFINITY,
            end_overshoot_threshold: f32::INFINITY,
            swiped_tab: None,
            first_visible: layout.first_visible_index(stack),
            last_axis: point.axis,
            attached_position: layout.attached_position(),
        }
    }

    #[inline]
    #[must_use]
    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    #[inline]
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    /// Distance dragged along the dragging axis since the threshold was
    /// crossed.
    #[must_use]
    pub fn drag_distance(&self) -> f32 {
        self.drag.distance()
    }

    /// Axis coordinate at which start overshoot was detected, or `-∞`.
    #[inline]
    #[must_use]
    pub fn start_overshoot_threshold(&self) -> f32 {
        self.start_overshoot_threshold
    }

    /// Axis coordinate at which end overshoot was detected, or `+∞`.
    #[inline]
    #[must_use]
    pub fn end_overshoot_threshold(&self) -> f32 {
        self.end_overshoot_threshold
    }

    /// The tab locked for swipe-to-close, if any.
    #[inline]
    #[must_use]
    pub fn swiped_tab(&self) -> Option<TabId> {
        self.swiped_tab
    }

    #[inline]
    #[must_use]
    pub fn first_visible_index(&self) -> Option<usize> {
        self.first_visible
    }

    #[inline]
    #[must_use]
    pub fn attached_position(&self) -> f32 {
        self.attached_position
    }

    fn set_state(&mut self, state: DragState) {
        if self.drag_state != state {
            tabstack_core::debug!(
                message = "drag.state",
                from = ?self.drag_state,
                to = ?state
            );
            self.drag_state = state;
        }
    }

    fn reset_overshoot_thresholds(&mut self) {
        self.start_overshoot_threshold = f32::NEG_INFINITY;
        self.end_overshoot_threshold = f32::INFINITY;
    }
}

// ---------------------------------------------------------------------------
// DragHandler
// ---------------------------------------------------------------------------

/// Gesture state machine for a tab switcher.
///
/// The handler owns no tabs. Each call borrows the layout rules and the tab
/// collection, mutates tags through layout passes and returns the events the
/// renderer has to act on.
#[derive(Debug, Default)]
pub struct DragHandler {
    session: Option<GestureSession>,
    flinging: bool,
}

impl DragHandler {
    /// Create an idle handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, if a pointer is down.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Drag phase of the active session; `None` when idle.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.session
            .as_ref()
            .map_or(DragState::None, GestureSession::drag_state)
    }

    /// Whether a fling emitted by this handler is still running.
    #[inline]
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.flinging
    }

    /// Process one pointer event.
    ///
    /// # Errors
    /// `InvalidArgument` if the event carries non-finite coordinates.
    pub fn handle(
        &mut self,
        layout: &StackingLayout,
        stack: &mut TabStack,
        event: &PointerEvent,
    ) -> Result<Vec<LayoutEvent>> {
        if !event.is_finite() {
            return Err(TabStackError::invalid(format!(
                "pointer coordinates must be finite, got ({}, {})",
                event.x, event.y
            )));
        }
        let point = layout.viewport().project(event.x, event.y);
        let mut out = Vec::with_capacity(4);
        let active = self.session.as_ref().map(GestureSession::pointer_id);

        match event.action {
            PointerAction::Down => {
                if self.flinging {
                    self.flinging = false;
                    out.push(LayoutEvent::CancelFling);
                }
                if active.is_some() {
                    tabstack_core::debug!(message = "drag.anomaly", reason = "second pointer down");
                    self.release(layout, stack, None, &mut out);
                }
                self.session = Some(GestureSession::begin(layout, stack, event, point));
            }
            PointerAction::Move => match active {
                Some(id) if id == event.pointer_id => {
                    self.on_move(layout, stack, event.timestamp, point, &mut out);
                }
                Some(_) => {
                    tabstack_core::debug!(message = "drag.anomaly", reason = "pointer id mismatch");
                    self.release(layout, stack, None, &mut out);
                    self.session = Some(GestureSession::begin(layout, stack, event, point));
                }
                None => {
                    self.session = Some(GestureSession::begin(layout, stack, event, point));
                }
            },
            PointerAction::Up => match active {
                Some(id) if id == event.pointer_id => {
                    self.release(layout, stack, Some((event.timestamp, point)), &mut out);
                }
                Some(_) => {
                    tabstack_core::debug!(message = "drag.anomaly", reason = "pointer id mismatch");
                    self.release(layout, stack, None, &mut out);
                }
                None => {}
            },
            PointerAction::Cancel => {
                if active.is_some() {
                    self.release(layout, stack, None, &mut out);
                }
            }
        }
        Ok(out)
    }

    /// Advance a running fling by `distance` pixels along the dragging axis
    /// (positive toward the end).
    ///
    /// The fling stops with `CancelFling` as soon as the layout overshoots.
    pub fn fling_step(
        &mut self,
        layout: &StackingLayout,
        stack: &mut TabStack,
        distance: f32,
    ) -> Vec<LayoutEvent> {
        let mut out = Vec::new();
        if !self.flinging || distance == 0.0 || !distance.is_finite() {
            return out;
        }
        let outcome = if distance > 0.0 {
            layout.drag_to_end(stack, None, distance)
        } else {
            layout.drag_to_start(stack, None, distance)
        };
        push_changes(stack, &outcome, &mut out);
        if outcome.overshoot {
            tabstack_core::debug!(message = "drag.fling", outcome = "overshoot");
            self.flinging = false;
            out.push(LayoutEvent::CancelFling);
        }
        out
    }

    /// Mark the running fling as finished. Returns whether one was running.
    pub fn end_fling(&mut self) -> bool {
        std::mem::replace(&mut self.flinging, false)
    }

    /// Stop a running fling and force the release path of an active gesture.
    pub fn cancel_fling(&mut self, layout: &StackingLayout, stack: &mut TabStack) -> Vec<LayoutEvent> {
        let mut out = Vec::new();
        if self.end_fling() {
            out.push(LayoutEvent::CancelFling);
        }
        if self.session.is_some() {
            self.release(layout, stack, None, &mut out);
        }
        out
    }

    /// Drop the session and any fling without emitting events.
    pub fn reset(&mut self) {
        self.session = None;
        self.flinging = false;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl DragHandler {
    fn on_move(
        &mut self,
        layout: &StackingLayout,
        stack: &mut TabStack,
        time: Duration,
        point: AxisPoint,
        out: &mut Vec<LayoutEvent>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.velocity.add(time, point);
        let axis = point.axis;

        // Overshoot feedback replaces movement past a recorded boundary.
        if axis <= session.start_overshoot_threshold {
            let threshold = session.start_overshoot_threshold;
            session.set_state(DragState::OvershootStart);
            session.last_axis = threshold;
            let first = stack.tag(0).map_or(0.0, |tag| tag.position);
            out.push(match layout.start_overshoot(threshold - axis, first) {
                Overshoot::Pull(position) => LayoutEvent::StartOvershoot { position },
                Overshoot::Tilt(angle) => LayoutEvent::TiltOnStartOvershoot { angle },
            });
            return;
        }
        if axis >= session.end_overshoot_threshold {
            let threshold = session.end_overshoot_threshold;
            session.set_state(DragState::OvershootEnd);
            session.last_axis = threshold;
            out.push(LayoutEvent::TiltOnEndOvershoot {
                angle: layout.end_overshoot_angle(axis - threshold),
            });
            return;
        }

        let reached = session.drag.update(axis);
        session.swipe.update(point.orthogonal);

        if let Some(tab) = session.swiped_tab {
            let distance = session.swipe.distance();
            out.push(LayoutEvent::Swipe {
                tab,
                distance,
                appearance: layout.swipe_appearance(distance),
            });
            return;
        }

        if session.drag_state == DragState::None
            && !session.drag.threshold_reached()
            && session.swipe.threshold_reached()
        {
            let hit = session
                .drag
                .start_position()
                .and_then(|start| layout.focused_tab(stack, start))
                .filter(|&index| stack.tag(index).is_some_and(|tag| !tag.closing))
                .and_then(|index| stack.tab(index))
                .filter(|tab| tab.closeable);
            if let Some(tab) = hit {
                tabstack_core::debug!(message = "drag.swipe", tab = %tab.id);
                session.swiped_tab = Some(tab.id);
                let distance = session.swipe.distance();
                out.push(LayoutEvent::Swipe {
                    tab: tab.id,
                    distance,
                    appearance: layout.swipe_appearance(distance),
                });
                return;
            }
        }

        if !session.drag.threshold_reached() {
            return;
        }

        let previous = session.last_axis;
        let state = match session.drag_state {
            DragState::OvershootStart => DragState::DragToEnd,
            DragState::OvershootEnd => DragState::DragToStart,
            _ if axis > previous => DragState::DragToEnd,
            _ if axis < previous => DragState::DragToStart,
            current => current,
        };
        session.set_state(state);
        let delta = if reached { 0.0 } else { axis - previous };
        session.last_axis = axis;

        let outcome = match state {
            DragState::DragToEnd => layout.drag_to_end(stack, session.first_visible, delta),
            DragState::DragToStart => layout.drag_to_start(stack, session.first_visible, delta),
            _ => return,
        };
        session.first_visible = outcome.first_visible;
        push_changes(stack, &outcome, out);

        if outcome.overshoot {
            if state == DragState::DragToEnd {
                session.end_overshoot_threshold = axis;
                session.set_state(DragState::OvershootEnd);
            } else {
                session.start_overshoot_threshold = axis;
                session.set_state(DragState::OvershootStart);
            }
            tabstack_core::debug!(message = "drag.overshoot", state = ?state, threshold = axis);
        } else {
            session.reset_overshoot_thresholds();
        }
    }

    /// End the active session. `last` is the lifting sample of a regular
    /// release; `None` marks a release forced by the handler itself.
    fn release(
        &mut self,
        layout: &StackingLayout,
        stack: &TabStack,
        last: Option<(Duration, AxisPoint)>,
        out: &mut Vec<LayoutEvent>,
    ) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let synthesized = last.is_none();
        if let Some((time, point)) = last {
            session.velocity.add(time, point);
            session.drag.update(point.axis);
            session.swipe.update(point.orthogonal);
        }
        let config = layout.config();

        let event = if let Some(tab) = session.swiped_tab {
            let velocity = session.velocity.velocity(Component::Orthogonal);
            let distance = session.swipe.distance();
            let fast = velocity.abs() >= config.min_swipe_velocity;
            let far =
                distance.abs() > layout.viewport().orthogonal_extent() * SWIPE_REMOVAL_RATIO;
            Some(LayoutEvent::SwipeEnded {
                tab,
                remove: fast || far,
                velocity: if fast { velocity } else { 0.0 },
            })
        } else if session.drag_state.is_dragging() && session.drag.threshold_reached() {
            fling(config, &session)
        } else if session.drag_state == DragState::OvershootEnd {
            Some(LayoutEvent::RevertEndOvershoot {
                max_angle: config.max_end_overshoot_angle,
            })
        } else if session.drag_state == DragState::OvershootStart {
            Some(LayoutEvent::RevertStartOvershoot {
                max_angle: config.max_start_overshoot_angle,
            })
        } else if !synthesized
            && !session.drag.threshold_reached()
            && !session.swipe.threshold_reached()
        {
            layout
                .focused_tab(stack, session.drag.current_position())
                .and_then(|index| Some((index, stack.tab(index)?.id)))
                .map(|(index, tab)| LayoutEvent::Click { tab, index })
        } else {
            None
        };

        tabstack_core::debug!(
            message = "drag.release",
            state = ?session.drag_state,
            synthesized,
            outcome = ?event
        );
        if let Some(event) = event {
            if matches!(event, LayoutEvent::Fling { .. }) {
                self.flinging = true;
            }
            out.push(event);
        }
    }
}

/// Fling for a released drag, if it was fast enough.
///
/// Only recent motion in the drag direction counts; drifting back against the
/// drag never flings.
fn fling(config: &StackConfig, session: &GestureSession) -> Option<LayoutEvent> {
    let sign = if session.drag_state == DragState::DragToEnd {
        1.0
    } else {
        -1.0
    };
    let speed = (session.velocity.velocity(Component::Axis) * sign).min(config.max_fling_velocity);
    if speed <= config.min_fling_velocity {
        return None;
    }
    let distance = FLING_DISTANCE_RATIO * speed * sign;
    Some(LayoutEvent::Fling {
        distance,
        duration: Duration::from_secs_f32(distance.abs() / speed),
    })
}

fn push_changes(stack: &TabStack, outcome: &PassOutcome, out: &mut Vec<LayoutEvent>) {
    out.extend(outcome.changed.iter().filter_map(|&index| {
        Some(LayoutEvent::ViewStateChanged {
            tab: stack.tab(index)?.id,
            index,
            tag: *stack.tag(index)?,
        })
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
