//! Error types for the CLI

use preflight::{PreflightError, ReadinessStatus};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine error
    #[error("{0}")]
    Engine(#[from] PreflightError),

    /// Proposal file could not be decoded
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        /// File that failed, `-` for stdin
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// HTTP server failure
    #[error("Server error: {message}")]
    Server {
        /// Error message
        message: String,
    },

    /// Verdict reached the `--fail-on` gate
    #[error("Readiness gate failed: {status}")]
    NotReady {
        /// Verdict that tripped the gate
        status: ReadinessStatus,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a server error
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}
