//! Output formats and stderr progress lines
//!
//! Reports go to stdout so they can be piped. Everything the CLI says about
//! its own progress goes through [`Reporter`] on stderr and is silenced by
//! `--quiet`.

use console::{style, Term};
use preflight::ReadinessStatus;
use serde::{Deserialize, Serialize};

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty JSON
    Json,
}

/// Readiness status, colored by severity when `use_color` is set
#[must_use]
pub fn styled_status(status: ReadinessStatus, use_color: bool) -> String {
    if !use_color {
        return status.as_str().to_string();
    }
    let label = style(status.as_str()).bold();
    match status {
        ReadinessStatus::Ready => label.green(),
        ReadinessStatus::NeedsWork => label.yellow(),
        ReadinessStatus::NotReady => label.red(),
    }
    .to_string()
}

/// Kind of progress line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A file was written
    Created,
    /// Something the user should double-check
    Caution,
    /// Follow-up hint
    Hint,
}

impl Marker {
    fn prefix(self, use_color: bool) -> String {
        match (self, use_color) {
            (Self::Created, true) => style("✓").green().bold().to_string(),
            (Self::Caution, true) => style("⚠").yellow().bold().to_string(),
            (Self::Hint, true) => style("→").cyan().to_string(),
            (Self::Created, false) => "created:".to_string(),
            (Self::Caution, false) => "warning:".to_string(),
            (Self::Hint, false) => "hint:".to_string(),
        }
    }
}

/// Format one progress line without writing it
#[must_use]
pub fn format_line(marker: Marker, message: &str, use_color: bool) -> String {
    format!("{} {message}", marker.prefix(use_color))
}

/// Progress reporter on stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    use_color: bool,
    quiet: bool,
}

impl Reporter {
    /// Reporter honoring the color and quiet settings
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Whether lines are suppressed
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn write(&self, line: &str) {
        if !self.quiet {
            let _ = self.term.write_line(line);
        }
    }

    /// A file was written
    pub fn created(&self, path: &str) {
        self.write(&format_line(Marker::Created, path, self.use_color));
    }

    /// Something the user should double-check
    pub fn caution(&self, message: &str) {
        self.write(&format_line(Marker::Caution, message, self.use_color));
    }

    /// Follow-up hint
    pub fn hint(&self, message: &str) {
        self.write(&format_line(Marker::Hint, message, self.use_color));
    }

    /// One-line summary of an analyzed proposal
    pub fn verdict(&self, source: &str, status: ReadinessStatus, summary: &str) {
        let status = styled_status(status, self.use_color);
        self.write(&format!("{source}: {status} ({summary})"));
    }
}
