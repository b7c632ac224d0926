//! Analyze command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Reporter};
use crate::report::{render_analysis_json, render_analysis_text};
use crate::AnalyzeArgs;
use preflight::{
    AnalysisResult, HypothesisConfig, PreflightError, ReadinessEngine, ReadinessStatus, TestProposal,
};
use std::io::Read;
use std::path::Path;

/// Path argument that reads from stdin
pub const STDIN_PATH: &str = "-";

/// Decoder picked for a proposal source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ProposalFormat {
    /// Pick by extension, sniffing the content when there is none
    #[must_use]
    pub fn detect(path: &str, source: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ if source.trim_start().starts_with('{') => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Decode a proposal from text
pub fn parse_proposal(path: &str, source: &str) -> CliResult<TestProposal> {
    match ProposalFormat::detect(path, source) {
        ProposalFormat::Json => {
            serde_json::from_str(source).map_err(|e| CliError::parse(path, e))
        }
        ProposalFormat::Yaml => {
            serde_yaml_ng::from_str(source).map_err(|e| CliError::parse(path, e))
        }
    }
}

/// Read and decode a proposal file, `-` for stdin
pub fn load_proposal(path: &str) -> CliResult<TestProposal> {
    let source = if path == STDIN_PATH {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    tracing::debug!(path, bytes = source.len(), "proposal loaded");
    parse_proposal(path, &source)
}

/// Render a result in the configured format
pub fn render(
    result: &AnalysisResult,
    scale: &HypothesisConfig,
    config: &CliConfig,
    detailed: bool,
) -> CliResult<String> {
    match config.format {
        OutputFormat::Text => Ok(render_analysis_text(
            result,
            scale,
            detailed,
            config.color.should_color(),
        )),
        OutputFormat::Json => render_analysis_json(result)
            .map_err(|e| CliError::Engine(PreflightError::from(e))),
    }
}

/// Fail when the verdict is at least as severe as the gate
pub fn check_gate(status: ReadinessStatus, gate: Option<ReadinessStatus>) -> CliResult<()> {
    match gate {
        Some(gate) if status.fails(gate) => Err(CliError::NotReady { status }),
        _ => Ok(()),
    }
}

/// Execute the analyze command
pub fn execute_analyze(config: &CliConfig, reporter: &Reporter, args: &AnalyzeArgs) -> CliResult<()> {
    let proposal = load_proposal(&args.file)?;
    let engine = ReadinessEngine::default();
    let result = engine.analyze(&proposal)?;

    if config.verbosity.is_verbose() {
        reporter.verdict(
            &args.file,
            result.readiness_status,
            &format!(
                "hypothesis {:.1}/10, {} day(s), {} recommendation(s)",
                result.hypothesis_analysis.overall_score,
                result.statistical_analysis.estimated_duration_days,
                result.overall_recommendations.len()
            ),
        );
    }

    let rendered = render(&result, &engine.config().hypothesis, config, args.detailed)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    check_gate(result.readiness_status, args.fail_on.map(ReadinessStatus::from))
}
