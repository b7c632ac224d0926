//! CLI command definitions using clap

use crate::config::ColorChoice;
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use preflight::ReadinessStatus;
use std::path::PathBuf;

/// Preflight: check whether an A/B test is ready to launch
#[derive(Parser, Debug)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a test proposal file
    Analyze(AnalyzeArgs),

    /// Write a template proposal
    Init(InitArgs),

    /// Print the tool-discovery manifest
    Manifest,

    /// Serve the analyzer over HTTP
    Serve(ServeArgs),
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Proposal file (YAML or JSON), `-` for stdin
    pub file: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Include per-dimension feedback and design recommendations
    #[arg(long)]
    pub detailed: bool,

    /// Exit non-zero when the verdict is this bad or worse
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOnArg>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the template; a directory gets `proposal.yaml`
    #[arg(default_value = "proposal.yaml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Enable permissive CORS
    #[arg(long)]
    pub cors: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Report format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Readiness gate argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOnArg {
    /// Fail on NEEDS_WORK or NOT_READY
    NeedsWork,
    /// Fail on NOT_READY only
    NotReady,
}

impl From<FailOnArg> for ReadinessStatus {
    fn from(arg: FailOnArg) -> Self {
        match arg {
            FailOnArg::NeedsWork => Self::NeedsWork,
            FailOnArg::NotReady => Self::NotReady,
        }
    }
}
