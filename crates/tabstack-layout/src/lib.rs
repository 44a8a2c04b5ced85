#![forbid(unsafe_code)]

//! Stacking layout engine.
//!
//! # Role in tabstack
//! `tabstack-layout` decides, for every tab, which discrete [`State`] it is in
//! and at which scalar offset along the dragging axis it sits. It owns the
//! per-tab [`Tag`] model and the pure stacking rules, and exposes the layout
//! passes the drag handler runs on every pointer move.
//!
//! # Modules
//! - [`tab`]: tab identity, stacking state, and the per-tab position tag.
//! - [`model`]: the ordered tab collection with its parallel tag array.
//! - [`iter`]: forward/reverse index iteration from an arbitrary start.
//! - [`stacking`]: pure stacking functions and the `clip` authority.
//! - [`arrange`]: drag, initial and relocation passes over a [`TabStack`].

pub mod arrange;
pub mod iter;
pub mod model;
pub mod stacking;
pub mod tab;

pub use arrange::PassOutcome;
pub use iter::ItemIter;
pub use model::{TabItem, TabStack};
pub use stacking::{Overshoot, StackingLayout, SwipeAppearance, non_linear_spacing};
pub use tab::{State, Tab, TabId, Tag};
pub use tabstack_core::geometry::{Orientation, Sides, Viewport};
