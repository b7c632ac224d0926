//! Log subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the level follows `-q`/`-v`.
//! Logs always go to stderr so reports on stdout stay machine-readable.

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_level()))
}

/// Install the global subscriber
pub fn init_logging(verbosity: Verbosity, json: bool) -> CliResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbosity));

    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| CliError::config(format!("failed to install log subscriber: {e}")))?;
    tracing::debug!(level = verbosity.log_level(), json, "logging initialized");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // Only one global subscriber may be installed per process
        let _ = init_logging(Verbosity::Quiet, false);
        let err = init_logging(Verbosity::Quiet, true).unwrap_err();
        assert!(err.to_string().contains("log subscriber"));
    }
}
