#![forbid(unsafe_code)]

//! Card-stack tab switcher runtime.
//!
//! # Role in tabstack
//! `tabstack` is the runtime layer. It turns pointer input into layout passes
//! through the [`DragHandler`] gesture state machine, reports everything the
//! renderer must draw or animate as a [`LayoutEvent`] stream, and serializes
//! structural changes behind an animation gate in [`TabSwitcher`].
//!
//! # Quick start
//!
//! ```
//! use std::time::Duration;
//! use tabstack::{LayoutEvent, PointerEvent, StackConfig, Tab, TabSwitcher, Viewport};
//!
//! let mut switcher = TabSwitcher::new(StackConfig::default(), Viewport::new(400.0, 1000.0))?;
//! for id in 0..4 {
//!     switcher.add_tab(Tab::new(id))?;
//! }
//! let events = switcher.show()?;
//! assert_eq!(events.last(), Some(&LayoutEvent::SwitcherShown));
//!
//! // The renderer reports the end of the show animation.
//! switcher.on_animation_end()?;
//!
//! let events = switcher.on_pointer(&PointerEvent::down(200.0, 320.0, Duration::ZERO))?;
//! assert!(events.is_empty());
//! # Ok::<(), tabstack::TabStackError>(())
//! ```
//!
//! # Modules
//! - [`layout_event`]: renderer notifications.
//! - [`drag_handler`]: the per-gesture state machine.
//! - [`pending`]: the structural action queue and the animation gate.
//! - [`switcher`]: the facade owning all of the above.

pub mod drag_handler;
pub mod layout_event;
pub mod pending;
pub mod switcher;

pub use drag_handler::{DragHandler, DragState, GestureSession};
pub use layout_event::LayoutEvent;
pub use pending::{AnimationGate, PendingAction, PendingActions};
pub use switcher::TabSwitcher;

pub use tabstack_core::config::StackConfig;
pub use tabstack_core::event::{PointerAction, PointerEvent};
pub use tabstack_core::geometry::{Orientation, Sides, Viewport};
pub use tabstack_core::{Result, TabStackError};
pub use tabstack_layout::{
    Overshoot, PassOutcome, StackingLayout, State, SwipeAppearance, Tab, TabId, TabStack, Tag,
};
