#![forbid(unsafe_code)]

//! Error taxonomy for tabstack.
//!
//! Only two kinds of failure ever reach a caller:
//!
//! - [`TabStackError::InvalidArgument`]: a precondition was violated (unknown
//!   tab, out-of-range index, unusable geometry). Never recovered silently.
//! - [`TabStackError::IllegalState`]: the engine was asked to do something its
//!   current state does not allow (layout without a maximum tab spacing, an
//!   animation end without a matching start).
//!
//! Gesture anomalies (a second pointer, a pointer id mismatch mid-drag) are not
//! errors; the drag handler recovers from them by forcing a release.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabStackError>;

#[derive(Debug, Error)]
pub enum TabStackError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("illegal state: {message}")]
    IllegalState { message: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TabStackError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Returns true for precondition violations.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true for invariant violations.
    #[must_use]
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState { .. })
    }
}

/// Errors that can occur when loading or validating a [`StackConfig`].
///
/// [`StackConfig`]: crate::config::StackConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[cfg(feature = "config-file")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_constructor_formats_message() {
        let error = TabStackError::invalid("index 7 out of range");
        assert!(error.is_invalid_argument());
        assert_eq!(error.to_string(), "invalid argument: index 7 out of range");
    }

    #[test]
    fn illegal_state_constructor_formats_message() {
        let error = TabStackError::illegal_state("no maximum tab spacing");
        assert!(error.is_illegal_state());
        assert!(!error.is_invalid_argument());
        assert_eq!(error.to_string(), "illegal state: no maximum tab spacing");
    }

    #[test]
    fn validation_errors_are_joined() {
        let error = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(error.to_string(), "validation errors: a; b");
        let wrapped: TabStackError = error.into();
        assert!(wrapped.to_string().starts_with("configuration error"));
    }
}
