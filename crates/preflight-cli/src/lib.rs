//! Preflight CLI Library
//!
//! Boundary around the readiness engine: proposal loading, report
//! rendering, the HTTP transport and the tool-discovery manifest.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod manifest;
mod output;
pub mod report;
pub mod server;

pub use commands::{
    AnalyzeArgs, Cli, ColorArg, Commands, FailOnArg, FormatArg, InitArgs, ServeArgs,
};
pub use config::{CliConfig, ColorChoice, ServerConfig, ServerConfigBuilder, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use manifest::{discovery_manifest, DiscoveryManifest, FunctionSpec, ParameterSpec, ParameterType};
pub use output::{format_line, styled_status, Marker, OutputFormat, Reporter};
pub use report::{render_analysis_json, render_analysis_text};
pub use server::{router, AppState};
