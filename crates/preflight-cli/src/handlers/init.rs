//! Init command handler

use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::InitArgs;
use std::path::{Path, PathBuf};

/// File name used when the target is a directory
pub const DEFAULT_FILE_NAME: &str = "proposal.yaml";

/// Commented starter proposal
#[must_use]
pub const fn proposal_template() -> &'static str {
    r"# Preflight test proposal
#
# Check it with: preflight analyze proposal.yaml

# What changes, the expected outcome, and why.
hypothesis: >-
  Changing the checkout button color to green will increase the conversion
  rate by 10% because user research shows the current button is hard to see.

# Current conversion rate of the control, between 0 and 1.
baseline_conversion_rate: 0.15

# Smallest absolute change worth detecting, between 0 and 1.
minimum_detectable_effect: 0.05

# Visitors entering the test per day, split evenly across variations.
daily_traffic: 1000

# Control plus treatments.
number_of_variations: 2

# Metric that decides the test.
primary_metric: checkout conversion rate

# Metrics monitored alongside the primary one.
secondary_metrics:
  - average order value

# Planned launch date (RFC 3339). Adds a projected end date to the report.
# test_start_date: 2026-11-02T09:00:00Z
"
}

/// Resolve where the template goes
#[must_use]
pub fn resolve_init_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Write the template, refusing to overwrite without `force`
pub fn write_template(path: &Path, force: bool) -> CliResult<PathBuf> {
    let target = resolve_init_path(path);
    if target.exists() && !force {
        return Err(CliError::invalid_argument(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, proposal_template())?;
    tracing::info!(path = %target.display(), force, "template written");
    Ok(target)
}

/// Execute the init command
pub fn execute_init(reporter: &Reporter, args: &InitArgs) -> CliResult<()> {
    let existing = resolve_init_path(&args.path);
    if args.force && existing.exists() {
        reporter.caution(&format!("Overwriting {}", existing.display()));
    }
    let target = write_template(&args.path, args.force)?;
    reporter.created(&target.display().to_string());
    reporter.hint(&format!("preflight analyze {}", target.display()));
    Ok(())
}
