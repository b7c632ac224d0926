//! Result and error types for Preflight.

use thiserror::Error;

/// Result type for Preflight operations
pub type PreflightResult<T> = Result<T, PreflightError>;

/// Errors that can occur in Preflight
///
/// Numerically extreme but valid proposals are never errors: the engine
/// clamps them and reports a warning instead.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// A proposal field is outside its documented range
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput {
        /// Offending field name
        field: &'static str,
        /// Error message
        message: String,
    },

    /// Engine configuration is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PreflightError {
    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's proposal
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
