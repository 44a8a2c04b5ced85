//! End-to-end gesture scenarios through the [`TabSwitcher`] facade.
//!
//! Each test builds a shown switcher (stack of 3 tabs at 10 px, 100 px
//! maximum spacing, 400 × 1000 portrait viewport), replays a pointer sequence
//! and checks the emitted events together with the switcher state.

use std::time::Duration;

use tabstack::{
    DragState, LayoutEvent, PendingAction, PointerEvent, StackConfig, State, Tab, TabId,
    TabSwitcher, Tag, Viewport,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn config() -> StackConfig {
    StackConfig::default()
        .with_stack(3, 10.0)
        .with_max_tab_spacing(100.0)
}

/// A shown switcher with `count` tabs whose show animation has finished.
fn shown_with(tabs: impl IntoIterator<Item = Tab>) -> TabSwitcher {
    let mut switcher = TabSwitcher::new(config(), Viewport::new(400.0, 1000.0)).unwrap();
    for tab in tabs {
        switcher.add_tab(tab).unwrap();
    }
    switcher.show().unwrap();
    switcher.on_animation_end().unwrap();
    assert!(switcher.is_idle());
    switcher
}

fn shown(count: u64) -> TabSwitcher {
    shown_with((0..count).map(Tab::new))
}

fn feed(switcher: &mut TabSwitcher, events: &[PointerEvent]) -> Vec<LayoutEvent> {
    events
        .iter()
        .flat_map(|event| switcher.on_pointer(event).unwrap())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Overshoot
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn fully_spread_stack_overshoots_at_end() {
    let mut switcher = shown(5);
    assert_eq!(switcher.stack().tag(3).unwrap().position, 100.0);

    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 250.0, ms(0)),
            PointerEvent::moved(200.0, 300.0, ms(16)),
        ],
    );
    assert!(events.is_empty());
    assert_eq!(switcher.drag_state(), DragState::OvershootEnd);
    let session = switcher.handler().session().unwrap();
    assert_eq!(session.end_overshoot_threshold(), 300.0);
    assert_eq!(session.start_overshoot_threshold(), f32::NEG_INFINITY);

    let events = feed(&mut switcher, &[PointerEvent::moved(200.0, 324.0, ms(32))]);
    assert_eq!(events, vec![LayoutEvent::TiltOnEndOvershoot { angle: 1.5 }]);

    let events = feed(&mut switcher, &[PointerEvent::up(200.0, 324.0, ms(48))]);
    assert_eq!(events, vec![LayoutEvent::RevertEndOvershoot { max_angle: 3.0 }]);
    assert_eq!(switcher.gate().running(), 1);
}

#[test]
fn single_tab_overshoots_at_start() {
    let mut switcher = shown(1);
    assert_eq!(
        switcher.stack().tag(0),
        Some(&Tag::new(0.0, State::StackedStartAtop))
    );

    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 300.0, ms(0)),
            PointerEvent::moved(200.0, 250.0, ms(16)),
        ],
    );
    assert!(events.is_empty());
    assert_eq!(switcher.drag_state(), DragState::OvershootStart);

    let events = feed(
        &mut switcher,
        &[
            PointerEvent::moved(200.0, 226.0, ms(32)),
            PointerEvent::moved(200.0, 150.0, ms(48)),
            PointerEvent::up(200.0, 150.0, ms(64)),
        ],
    );
    assert_eq!(
        events,
        vec![
            LayoutEvent::StartOvershoot { position: 0.0 },
            LayoutEvent::TiltOnStartOvershoot { angle: 3.0 },
            LayoutEvent::RevertStartOvershoot { max_angle: 3.0 },
        ]
    );
    // Overshoot feedback never moves tabs.
    assert_eq!(
        switcher.stack().tag(0),
        Some(&Tag::new(0.0, State::StackedStartAtop))
    );
}

#[test]
fn leaving_end_overshoot_drags_back_toward_start() {
    let mut switcher = shown(5);
    feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 250.0, ms(0)),
            PointerEvent::moved(200.0, 300.0, ms(16)),
        ],
    );
    assert_eq!(switcher.drag_state(), DragState::OvershootEnd);

    let events = feed(&mut switcher, &[PointerEvent::moved(200.0, 280.0, ms(32))]);
    assert_eq!(switcher.drag_state(), DragState::DragToStart);
    assert!(events.contains(&LayoutEvent::ViewStateChanged {
        tab: TabId(0),
        index: 0,
        tag: Tag::new(380.0, State::Floating),
    }));
    let session = switcher.handler().session().unwrap();
    assert_eq!(session.end_overshoot_threshold(), f32::INFINITY);
}

// ═══════════════════════════════════════════════════════════════════════
// Swipe to close
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn slow_long_swipe_removes_tab() {
    let mut switcher = shown(20);
    assert_eq!(
        switcher.stack().tag(0),
        Some(&Tag::new(500.0, State::Floating))
    );

    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::moved(230.0, 510.0, ms(100)),
            PointerEvent::moved(290.0, 510.0, ms(900)),
        ],
    );
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[1],
        LayoutEvent::Swipe { tab: TabId(0), distance, .. } if distance == 60.0
    ));
    assert_eq!(switcher.handler().session().unwrap().swiped_tab(), Some(TabId(0)));

    // 120 px past the threshold is 0.3 of the orthogonal extent; the last
    // 400 ms moved at 150 px/s, below the minimum swipe velocity.
    let events = feed(&mut switcher, &[PointerEvent::up(350.0, 510.0, ms(1300))]);
    assert_eq!(
        events,
        vec![LayoutEvent::SwipeEnded {
            tab: TabId(0),
            remove: true,
            velocity: 0.0,
        }]
    );
    assert!(switcher.stack().tag(0).unwrap().closing);
    assert_eq!(
        switcher.pending().peek(),
        Some(&PendingAction::Close(TabId(0)))
    );

    let events = switcher.on_animation_end().unwrap();
    assert_eq!(
        events.first(),
        Some(&LayoutEvent::TabRemoved {
            tab: TabId(0),
            index: 0,
            animated: true,
        })
    );
    assert!(events.contains(&LayoutEvent::SelectionChanged {
        previous: Some(TabId(0)),
        selected: Some(TabId(1)),
    }));
    assert_eq!(switcher.stack().len(), 19);
}

#[test]
fn fast_swipe_reports_velocity() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::moved(220.0, 510.0, ms(50)),
            PointerEvent::up(300.0, 510.0, ms(250)),
        ],
    );
    // Only 80 px far, but exactly at the minimum swipe velocity.
    assert_eq!(
        events.last(),
        Some(&LayoutEvent::SwipeEnded {
            tab: TabId(0),
            remove: true,
            velocity: 400.0,
        })
    );
}

#[test]
fn short_slow_swipe_keeps_tab() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::moved(220.0, 510.0, ms(200)),
            PointerEvent::up(250.0, 510.0, ms(1000)),
        ],
    );
    assert_eq!(
        events.last(),
        Some(&LayoutEvent::SwipeEnded {
            tab: TabId(0),
            remove: false,
            velocity: 0.0,
        })
    );
    assert!(switcher.pending().is_empty());
    assert!(!switcher.stack().tag(0).unwrap().closing);
}

#[test]
fn non_closeable_tab_is_not_swiped() {
    let mut switcher = shown_with((0..20).map(|id| Tab::new(id).closeable(id != 0)));
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::moved(260.0, 510.0, ms(100)),
            PointerEvent::up(260.0, 510.0, ms(200)),
        ],
    );
    assert!(events.is_empty());
}

#[test]
fn clear_during_swipe_turns_the_close_into_a_no_op() {
    let mut switcher = shown(5);
    feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 450.0, ms(0)),
            PointerEvent::moved(230.0, 450.0, ms(100)),
        ],
    );
    assert_eq!(switcher.handler().session().unwrap().swiped_tab(), Some(TabId(0)));
    assert!(switcher.clear_tabs().unwrap().is_empty());

    let events = feed(&mut switcher, &[PointerEvent::up(350.0, 450.0, ms(200))]);
    assert!(matches!(
        events.last(),
        Some(LayoutEvent::SwipeEnded { tab: TabId(0), remove: true, .. })
    ));
    assert_eq!(
        switcher.pending().iter().copied().collect::<Vec<_>>(),
        vec![PendingAction::Clear, PendingAction::Close(TabId(0))]
    );

    let events = switcher.on_animation_end().unwrap();
    assert_eq!(
        events.first(),
        Some(&LayoutEvent::AllTabsRemoved { animated: true })
    );
    assert!(switcher.on_animation_end().unwrap().is_empty());
    assert!(switcher.pending().is_empty());
    assert!(switcher.is_idle());
    assert!(switcher.stack().is_empty());
}

#[test]
fn explicit_remove_supersedes_swipe_close() {
    let mut switcher = shown(20);
    feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::moved(230.0, 510.0, ms(100)),
            PointerEvent::up(350.0, 510.0, ms(200)),
        ],
    );
    assert_eq!(
        switcher.pending().peek(),
        Some(&PendingAction::Close(TabId(0)))
    );

    assert!(switcher.remove_tab(TabId(0)).unwrap().is_empty());
    assert_eq!(
        switcher.pending().iter().copied().collect::<Vec<_>>(),
        vec![PendingAction::Remove(TabId(0))]
    );

    let events = switcher.on_animation_end().unwrap();
    let removed = events
        .iter()
        .filter(|e| matches!(e, LayoutEvent::TabRemoved { tab: TabId(0), .. }))
        .count();
    assert_eq!(removed, 1);
    while !switcher.gate().is_idle() {
        switcher.on_animation_end().unwrap();
    }
    assert!(switcher.pending().is_empty());
    assert_eq!(switcher.stack().len(), 19);
}

// ═══════════════════════════════════════════════════════════════════════
// Fling
// ═══════════════════════════════════════════════════════════════════════

fn drag_release(switcher: &mut TabSwitcher, release_axis: f32) -> Vec<LayoutEvent> {
    feed(
        switcher,
        &[
            PointerEvent::down(200.0, 100.0, ms(0)),
            PointerEvent::moved(200.0, 175.0, ms(500)),
            PointerEvent::up(200.0, release_axis, ms(1000)),
        ],
    )
}

#[test]
fn release_at_exactly_min_velocity_does_not_fling() {
    let mut switcher = shown(20);
    // 75 px over the last half second.
    let events = drag_release(&mut switcher, 250.0);
    assert!(events.is_empty());
    assert!(!switcher.handler().is_flinging());
    assert!(switcher.gate().is_idle());
}

#[test]
fn release_above_min_velocity_flings() {
    let mut switcher = shown(20);
    let events = drag_release(&mut switcher, 250.5);
    assert_eq!(
        events,
        vec![LayoutEvent::Fling {
            distance: 37.75,
            duration: ms(250),
        }]
    );
    assert!(switcher.handler().is_flinging());
    assert_eq!(switcher.gate().running(), 1);

    let events = switcher.fling_step(20.0).unwrap();
    assert!(events.contains(&LayoutEvent::ViewStateChanged {
        tab: TabId(0),
        index: 0,
        tag: Tag::new(520.0, State::Floating),
    }));

    assert!(switcher.end_fling().unwrap().is_empty());
    assert!(switcher.gate().is_idle());
    assert!(!switcher.handler().is_flinging());
}

#[test]
fn slow_drift_against_the_drag_does_not_fling() {
    let mut switcher = shown(20);
    let mut sequence = vec![PointerEvent::down(200.0, 100.0, ms(0))];
    // 1000 px/s toward the end, then 50 px/s back toward the start.
    sequence.extend((1..=4).map(|step| {
        PointerEvent::moved(200.0, 100.0 + step as f32 * 100.0, ms(step * 100))
    }));
    sequence.extend((1..=4).map(|step| {
        PointerEvent::moved(200.0, 500.0 - step as f32 * 5.0, ms(400 + step * 100))
    }));
    feed(&mut switcher, &sequence);
    assert_eq!(switcher.drag_state(), DragState::DragToStart);

    let events = feed(&mut switcher, &[PointerEvent::up(200.0, 480.0, ms(810))]);
    assert!(
        !events.iter().any(|e| matches!(e, LayoutEvent::Fling { .. })),
        "{events:?}"
    );
    assert!(!switcher.handler().is_flinging());
    assert!(switcher.is_idle());
}

#[test]
fn fast_finish_after_slow_drag_flings() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 100.0, ms(0)),
            PointerEvent::moved(200.0, 110.0, ms(400)),
            PointerEvent::moved(200.0, 120.0, ms(800)),
            PointerEvent::moved(200.0, 180.0, ms(900)),
            PointerEvent::up(200.0, 200.0, ms(1000)),
        ],
    );
    // 100 px/s on average, but 200 px/s over the last 100 ms.
    assert_eq!(
        events.last(),
        Some(&LayoutEvent::Fling {
            distance: 50.0,
            duration: ms(250),
        })
    );
}

#[test]
fn pointer_down_cancels_running_fling() {
    let mut switcher = shown(20);
    drag_release(&mut switcher, 300.0);
    assert!(switcher.handler().is_flinging());

    let events = feed(&mut switcher, &[PointerEvent::down(200.0, 100.0, ms(1100))]);
    assert_eq!(events, vec![LayoutEvent::CancelFling]);
    assert!(switcher.gate().is_idle());
    assert!(switcher.handler().session().is_some());
}

#[test]
fn fling_velocity_is_capped() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 100.0, ms(0)),
            PointerEvent::moved(200.0, 150.0, ms(1)),
            PointerEvent::up(200.0, 200.0, ms(2)),
        ],
    );
    assert_eq!(
        events,
        vec![LayoutEvent::Fling {
            distance: 2_000.0,
            duration: ms(250),
        }]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Clicks and pointer anomalies
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn tap_on_atop_tab_clicks_it() {
    let mut switcher = shown(5);
    assert_eq!(
        switcher.stack().tag(4),
        Some(&Tag::new(0.0, State::StackedStartAtop))
    );
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 50.0, ms(0)),
            PointerEvent::up(202.0, 52.0, ms(90)),
        ],
    );
    assert_eq!(
        events,
        vec![LayoutEvent::Click {
            tab: TabId(4),
            index: 4,
        }]
    );
}

#[test]
fn pointer_mismatch_releases_without_click() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::up(200.0, 510.0, ms(50)).with_pointer(1),
        ],
    );
    assert!(events.is_empty());
    assert!(switcher.handler().session().is_none());
}

#[test]
fn cancel_ends_gesture_without_click() {
    let mut switcher = shown(20);
    let events = feed(
        &mut switcher,
        &[
            PointerEvent::down(200.0, 510.0, ms(0)),
            PointerEvent::cancel(200.0, 510.0, ms(50)),
        ],
    );
    assert!(events.is_empty());
    assert!(switcher.is_idle());
}

#[test]
fn non_finite_pointer_is_rejected() {
    let mut switcher = shown(3);
    let err = switcher
        .on_pointer(&PointerEvent::moved(200.0, f32::INFINITY, ms(0)))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

// ═══════════════════════════════════════════════════════════════════════
// Queue gating
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn structural_changes_wait_for_gesture_and_animation() {
    let mut switcher = shown(5);
    feed(&mut switcher, &[PointerEvent::down(200.0, 50.0, ms(0))]);

    // A pointer is down: the request is only queued.
    assert!(switcher.add_tab(Tab::new(5)).unwrap().is_empty());
    assert_eq!(switcher.pending().len(), 1);

    let events = feed(&mut switcher, &[PointerEvent::up(200.0, 50.0, ms(60))]);
    assert_eq!(
        events[..2],
        [
            LayoutEvent::Click {
                tab: TabId(4),
                index: 4,
            },
            LayoutEvent::TabAdded {
                tab: TabId(5),
                index: 5,
                animated: true,
            },
        ]
    );
    assert_eq!(switcher.gate().running(), 1);

    // The add animation holds the next request.
    assert!(switcher.select_tab(TabId(5)).unwrap().is_empty());
    let events = switcher.on_animation_end().unwrap();
    assert_eq!(
        events,
        vec![LayoutEvent::SelectionChanged {
            previous: Some(TabId(0)),
            selected: Some(TabId(5)),
        }]
    );
    assert!(switcher.is_idle());
}

#[test]
fn hide_waits_for_running_animation() {
    let mut switcher = shown(3);
    switcher.remove_tab(TabId(2)).unwrap();
    assert_eq!(switcher.gate().running(), 1);

    assert!(switcher.hide().unwrap().is_empty());
    assert!(switcher.is_shown());

    let events = switcher.on_animation_end().unwrap();
    assert_eq!(events, vec![LayoutEvent::SwitcherHidden]);
    assert!(!switcher.is_shown());
}
