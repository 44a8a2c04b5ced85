// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: pointer input, geometry, configuration, and errors for tabstack.
//!
//! # Role in tabstack
//! `tabstack-core` is the input layer. It owns the tunable [`StackConfig`],
//! the [`Viewport`] geometry queries, normalized [`PointerEvent`] values and
//! the per-axis trackers the drag handler uses to decide when a gesture
//! crosses its thresholds and how fast it moved.
//!
//! # How it fits in the system
//! The layout engine (`tabstack-layout`) consumes the config and viewport to
//! compute tab positions. The runtime (`tabstack`) consumes pointer events,
//! feeds them through the trackers here, and drives the layout engine.
//!
//! [`StackConfig`]: config::StackConfig
//! [`Viewport`]: geometry::Viewport
//! [`PointerEvent`]: event::PointerEvent

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

pub use error::{ConfigError, Result, TabStackError};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
