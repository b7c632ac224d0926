//! Preflight CLI: A/B test readiness analysis
//!
//! ## Usage
//!
//! ```bash
//! preflight init                          # Write proposal.yaml
//! preflight analyze proposal.yaml         # Text report
//! preflight analyze - --format json       # Proposal from stdin, JSON out
//! preflight analyze p.yaml --fail-on not-ready
//! preflight serve --port 8000 --cors      # HTTP transport
//! ```

use clap::Parser;
use preflight_cli::{
    handlers::{execute_analyze, execute_init, execute_manifest, execute_serve},
    init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, OutputFormat, Reporter,
    Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_logging(config.verbosity, cli.log_json)?;

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Analyze(args) => execute_analyze(&config, &reporter, &args),
        Commands::Init(args) => execute_init(&reporter, &args),
        Commands::Manifest => execute_manifest(),
        Commands::Serve(args) => execute_serve(&args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();
    let format = match &cli.command {
        Commands::Analyze(args) => OutputFormat::from(args.format),
        _ => OutputFormat::default(),
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(format)
}
