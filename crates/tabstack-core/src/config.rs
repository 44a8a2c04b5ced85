#![forbid(unsafe_code)]

//! Tunable geometry and gesture constants for a tab switcher.
//!
//! [`StackConfig`] groups every spacing, threshold and velocity the layout
//! engine and drag handler consult. It is immutable per switcher instance and
//! can be loaded from TOML or JSON when the `config-file` feature is enabled.
//!
//! # Loading
//!
//! ```toml
//! # tabstack.toml
//! stacked_tab_count = 3
//! stacked_tab_spacing = 8.0
//! max_tab_spacing = 120.0
//! min_fling_velocity = 150.0
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "config-file")]
//! # fn main() -> Result<(), tabstack_core::ConfigError> {
//! use tabstack_core::config::StackConfig;
//!
//! let config = StackConfig::from_toml_file("tabstack.toml")?;
//! assert!(config.validate().is_empty());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "config-file"))]
//! # fn main() {}
//! ```
//!
//! # Defaults
//!
//! Every field has a default, so a file only needs to list what it changes.

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, TabStackError};

/// Ratio between the minimum and the maximum spacing of floating tabs.
pub const MIN_TAB_SPACING_RATIO: f32 = 0.375;

/// Fraction of the release velocity converted into fling distance.
pub const FLING_DISTANCE_RATIO: f32 = 0.25;

/// Fraction of the orthogonal extent a swiped tab must travel to be removed.
pub const SWIPE_REMOVAL_RATIO: f32 = 0.25;

// ---------------------------------------------------------------------------
// StackConfig
// ---------------------------------------------------------------------------

/// Geometry and gesture constants of a tab switcher.
///
/// Distances are in pixels, velocities in pixels per second, angles in
/// degrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct StackConfig {
    /// Number of tabs visible in a stack before further tabs are hidden.
    pub stacked_tab_count: usize,
    /// Distance between two tabs inside a stack.
    pub stacked_tab_spacing: f32,
    /// Maximum distance between two floating tabs. `None` means the value
    /// has not been configured yet and layouts cannot be computed.
    pub max_tab_spacing: Option<f32>,
    /// Distance the pointer may travel past a boundary before the
    /// rubber-band pull turns into a tilt.
    pub max_overshoot_distance: f32,
    /// Maximum tilt angle when overshooting at the start.
    pub max_start_overshoot_angle: f32,
    /// Maximum tilt angle when overshooting at the end.
    pub max_end_overshoot_angle: f32,
    /// Release velocity a drag must exceed to fling.
    pub min_fling_velocity: f32,
    /// Upper bound applied to measured fling velocities.
    pub max_fling_velocity: f32,
    /// Release velocity at which a swiped tab is removed.
    pub min_swipe_velocity: f32,
    /// Movement along the dragging axis before a drag starts.
    pub drag_threshold: f32,
    /// Movement along the orthogonal axis before a swipe starts.
    pub swipe_threshold: f32,
    /// Span of recent pointer motion that release velocities are measured over.
    pub velocity_horizon_ms: u64,
    /// Opacity of a tab swiped across the full orthogonal extent.
    pub swiped_tab_alpha: f32,
    /// Scale of a tab swiped across the full orthogonal extent.
    pub swiped_tab_scale: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stacked_tab_count: 3,
            stacked_tab_spacing: 8.0,
            max_tab_spacing: Some(100.0),
            max_overshoot_distance: 48.0,
            max_start_overshoot_angle: 3.0,
            max_end_overshoot_angle: 3.0,
            min_fling_velocity: 150.0,
            max_fling_velocity: 8_000.0,
            min_swipe_velocity: 400.0,
            drag_threshold: 8.0,
            swipe_threshold: 8.0,
            velocity_horizon_ms: 100,
            swiped_tab_alpha: 0.5,
            swiped_tab_scale: 0.9,
        }
    }
}

impl StackConfig {
    /// Maximum spacing of floating tabs.
    ///
    /// # Errors
    /// `IllegalState` if no maximum spacing has been configured.
    pub fn max_tab_spacing(&self) -> Result<f32> {
        self.max_tab_spacing.ok_or_else(|| {
            TabStackError::illegal_state("maximum tab spacing has not been configured")
        })
    }

    /// Minimum spacing of floating tabs, derived from the maximum.
    ///
    /// # Errors
    /// `IllegalState` if no maximum spacing has been configured.
    pub fn min_tab_spacing(&self) -> Result<f32> {
        Ok(self.max_tab_spacing()? * MIN_TAB_SPACING_RATIO)
    }

    /// Set the maximum spacing of floating tabs.
    #[must_use]
    pub fn with_max_tab_spacing(mut self, spacing: f32) -> Self {
        self.max_tab_spacing = Some(spacing);
        self
    }

    /// Set the stack depth and the spacing inside a stack.
    #[must_use]
    pub fn with_stack(mut self, count: usize, spacing: f32) -> Self {
        self.stacked_tab_count = count;
        self.stacked_tab_spacing = spacing;
        self
    }

    /// Set the drag and swipe thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, drag: f32, swipe: f32) -> Self {
        self.drag_threshold = drag;
        self.swipe_threshold = swipe;
        self
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid. A missing maximum spacing is not reported here; it is an
    /// illegal state only once a layout is requested.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.stacked_tab_count == 0 {
            errors.push("stacked_tab_count must be at least 1".to_string());
        }
        check_non_negative(&mut errors, "stacked_tab_spacing", self.stacked_tab_spacing);
        if let Some(max) = self.max_tab_spacing
            && !(max.is_finite() && max > 0.0)
        {
            errors.push(format!("max_tab_spacing must be positive, got {max}"));
        }
        check_positive(&mut errors, "max_overshoot_distance", self.max_overshoot_distance);
        check_non_negative(
            &mut errors,
            "max_start_overshoot_angle",
            self.max_start_overshoot_angle,
        );
        check_non_negative(
            &mut errors,
            "max_end_overshoot_angle",
            self.max_end_overshoot_angle,
        );
        check_non_negative(&mut errors, "min_fling_velocity", self.min_fling_velocity);
        check_positive(&mut errors, "max_fling_velocity", self.max_fling_velocity);
        if self.max_fling_velocity < self.min_fling_velocity {
            errors.push(format!(
                "max_fling_velocity ({}) must not be below min_fling_velocity ({})",
                self.max_fling_velocity, self.min_fling_velocity
            ));
        }
        check_non_negative(&mut errors, "min_swipe_velocity", self.min_swipe_velocity);
        check_non_negative(&mut errors, "drag_threshold", self.drag_threshold);
        check_non_negative(&mut errors, "swipe_threshold", self.swipe_threshold);
        if self.velocity_horizon_ms == 0 {
            errors.push("velocity_horizon_ms must be at least 1".to_string());
        }
        check_unit(&mut errors, "swiped_tab_alpha", self.swiped_tab_alpha);
        check_unit(&mut errors, "swiped_tab_scale", self.swiped_tab_scale);

        errors
    }

    /// Validate and convert the result into a `Result`.
    ///
    /// # Errors
    /// `ConfigError::Validation` listing every out-of-range field.
    pub fn validated(self) -> std::result::Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }
}

fn check_non_negative(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{name} must be finite and non-negative, got {value}"));
    }
}

fn check_positive(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(format!("{name} must be finite and positive, got {value}"));
    }
}

fn check_unit(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{name} must be in [0, 1], got {value}"));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
