//! Property-based invariant tests for the drag handler driven through the
//! switcher facade.
//!
//! Random pointer streams (including stray pointer ids and cancels), fling
//! steps, animation callbacks and clears are replayed against a shown switcher. After
//! every step:
//!
//! 1. No call fails for finite input
//! 2. A call ends at most one gesture
//! 3. Clicks only answer a pointer up
//! 4. Swipe release velocity is 0 or at least the minimum swipe velocity
//! 5. Every tag is consistent with `clip` and exactly one tab is atop

use std::time::Duration;

use proptest::prelude::*;
use tabstack::{
    LayoutEvent, PointerAction, PointerEvent, StackConfig, State, Tab, TabSwitcher, Viewport,
};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Pointer {
        action: PointerAction,
        x: f32,
        y: f32,
        pointer: u32,
    },
    Fling(f32),
    Settle,
    Clear,
}

fn pointer_strategy() -> impl Strategy<Value = Op> {
    (
        prop_oneof![
            1 => Just(PointerAction::Down),
            6 => Just(PointerAction::Move),
            2 => Just(PointerAction::Up),
            1 => Just(PointerAction::Cancel),
        ],
        0.0f32..400.0,
        0.0f32..1000.0,
        prop_oneof![8 => Just(0u32), 1 => Just(1u32)],
    )
        .prop_map(|(action, x, y, pointer)| Op::Pointer {
            action,
            x,
            y,
            pointer,
        })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        36 => pointer_strategy(),
        3 => (-200.0f32..200.0).prop_map(Op::Fling),
        3 => Just(Op::Settle),
        1 => Just(Op::Clear),
    ]
}

fn switcher(count: u64) -> TabSwitcher {
    let config = StackConfig::default()
        .with_stack(3, 10.0)
        .with_max_tab_spacing(100.0);
    let mut switcher = TabSwitcher::new(config, Viewport::new(400.0, 1000.0)).unwrap();
    for id in 0..count {
        switcher.add_tab(Tab::new(id).closeable(id % 3 != 0)).unwrap();
    }
    switcher.show().unwrap();
    switcher.on_animation_end().unwrap();
    switcher
}

/// Finish every running animation the way a renderer would.
fn settle(switcher: &mut TabSwitcher) -> Vec<LayoutEvent> {
    let mut events = switcher.end_fling().unwrap();
    while !switcher.gate().is_idle() {
        events.extend(switcher.on_animation_end().unwrap());
    }
    events
}

fn check_layout(switcher: &TabSwitcher) -> Result<(), TestCaseError> {
    let stack = switcher.stack();
    let count = stack.len();
    if count == 0 {
        return Ok(());
    }
    for index in 0..count {
        let tag = *stack.tag(index).unwrap();
        let predecessor = index.checked_sub(1).and_then(|p| stack.tag(p));
        let clipped = switcher
            .layout()
            .clip(index, count, tag.position, predecessor);
        prop_assert_eq!(clipped.position, tag.position, "tab {}", index);
        prop_assert_eq!(clipped.state, tag.state, "tab {}", index);
    }
    let atop = stack
        .tags()
        .iter()
        .filter(|tag| tag.state == State::StackedStartAtop)
        .count();
    prop_assert_eq!(atop, 1);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Random gesture streams
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn random_streams_keep_invariants(
        count in 1u64..24,
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let mut switcher = switcher(count);
        let min_swipe = switcher.config().min_swipe_velocity;
        let mut time = 0u64;
        for op in ops {
            time += 16;
            let (events, action) = match op {
                Op::Pointer { action, x, y, pointer } => {
                    let event = PointerEvent::new(action, x, y, Duration::from_millis(time))
                        .with_pointer(pointer);
                    (switcher.on_pointer(&event), Some(action))
                }
                Op::Fling(distance) => (switcher.fling_step(distance), None),
                Op::Settle => (Ok(settle(&mut switcher)), None),
                Op::Clear => (switcher.clear_tabs(), None),
            };
            let events = events.map_err(|e| TestCaseError::fail(e.to_string()))?;

            let terminal = events.iter().filter(|e| e.is_terminal()).count();
            prop_assert!(terminal <= 1, "{:?}", events);
            for event in &events {
                match event {
                    LayoutEvent::Click { .. } => {
                        prop_assert_eq!(action, Some(PointerAction::Up));
                    }
                    LayoutEvent::SwipeEnded { velocity, .. } => {
                        prop_assert!(*velocity == 0.0 || velocity.abs() >= min_swipe);
                    }
                    _ => {}
                }
            }
            check_layout(&switcher)?;
        }
        switcher.on_pointer(&PointerEvent::cancel(0.0, 0.0, Duration::from_millis(time)))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        settle(&mut switcher);
        prop_assert!(switcher.is_idle());
        prop_assert!(switcher.pending().is_empty());
    }

    #[test]
    fn hidden_switcher_ignores_pointers(
        ops in prop::collection::vec(pointer_strategy(), 1..40),
    ) {
        let mut switcher = switcher(6);
        switcher.hide().unwrap();
        switcher.on_animation_end().unwrap();
        let before = switcher.stack().tags().to_vec();
        for (step, op) in ops.into_iter().enumerate() {
            if let Op::Pointer { action, x, y, pointer } = op {
                let event = PointerEvent::new(action, x, y, Duration::from_millis(step as u64))
                    .with_pointer(pointer);
                prop_assert!(switcher.on_pointer(&event).unwrap().is_empty());
            }
        }
        prop_assert_eq!(switcher.stack().tags(), &before[..]);
        prop_assert!(switcher.handler().session().is_none());
    }
}
