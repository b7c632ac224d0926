//! Readiness engine facade

use crate::config::EngineConfig;
use crate::design::DesignValidator;
use crate::hypothesis::HypothesisScorer;
use crate::proposal::TestProposal;
use crate::readiness::{AnalysisResult, ReadinessAggregator};
use crate::result::PreflightResult;
use crate::statistical::StatisticalAnalyzer;

/// Runs the full analysis pipeline for a proposal
///
/// ```
/// use preflight::{ReadinessEngine, ReadinessStatus, TestProposal};
///
/// let engine = ReadinessEngine::default();
/// let proposal = TestProposal::new(
///     "Changing the checkout button color will increase the conversion rate by 10% \
///      because research shows the button is hard to see",
///     0.15,
///     0.05,
///     1000,
///     "checkout conversion rate",
/// );
/// let result = engine.analyze(&proposal).unwrap();
/// assert_eq!(result.readiness_status, ReadinessStatus::Ready);
/// ```
#[derive(Debug)]
pub struct ReadinessEngine {
    config: EngineConfig,
    statistical: StatisticalAnalyzer,
    hypothesis: HypothesisScorer,
    design: DesignValidator,
    aggregator: ReadinessAggregator,
}

impl Default for ReadinessEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl ReadinessEngine {
    /// Engine with custom constants
    pub fn new(config: EngineConfig) -> PreflightResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            statistical: StatisticalAnalyzer::new(config.statistical.clone()),
            hypothesis: HypothesisScorer::new(config.hypothesis.clone()),
            design: DesignValidator::new(config.design.clone(), config.statistical.clone()),
            aggregator: ReadinessAggregator::new(config.readiness.clone()),
            config,
        }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the hypothesis scorer, e.g. one with custom rules
    #[must_use]
    pub fn with_hypothesis_scorer(mut self, scorer: HypothesisScorer) -> Self {
        self.hypothesis = scorer;
        self
    }

    /// Validate, normalize and analyze a proposal
    #[tracing::instrument(
        name = "analyze",
        skip_all,
        fields(hypothesis = %proposal.hypothesis_preview())
    )]
    pub fn analyze(&self, proposal: &TestProposal) -> PreflightResult<AnalysisResult> {
        proposal.validate()?;
        let proposal = proposal.normalized();

        let statistical = self.statistical.analyze(
            proposal.baseline_conversion_rate,
            proposal.minimum_detectable_effect,
            proposal.daily_traffic,
            proposal.number_of_variations,
        )?;
        let hypothesis = self.hypothesis.score(&proposal.hypothesis);
        let design = self.design.validate(&proposal);

        let result = self
            .aggregator
            .aggregate(statistical, hypothesis, design)
            .with_start_date(proposal.test_start_date);

        tracing::info!(
            status = %result.readiness_status,
            hypothesis_score = result.hypothesis_analysis.overall_score,
            duration_days = result.statistical_analysis.estimated_duration_days,
            "analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::readiness::ReadinessStatus;

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_critical_values(-1.0, 0.84, 0.95, 0.8);
        assert!(ReadinessEngine::new(config).is_err());
    }

    #[test]
    fn test_invalid_proposal_rejected() {
        let proposal = TestProposal::new("h", 0.1, 0.0, 1000, "ctr");
        let err = ReadinessEngine::default().analyze(&proposal).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_analyzes_normalized_proposal() {
        let proposal = TestProposal::new("   ", 0.15, 0.05, 1000, " signup rate ")
            .with_secondary_metrics(["revenue", " revenue "]);
        let result = ReadinessEngine::default().analyze(&proposal).unwrap();
        assert_eq!(result.hypothesis_analysis.overall_score, 0.0);
        assert_eq!(result.readiness_status, ReadinessStatus::NotReady);
        let secondary = result
            .design_analysis
            .metric_warnings
            .iter()
            .filter(|w| w.starts_with("Secondary metric 'revenue'"))
            .count();
        assert_eq!(secondary, 1);
    }

    #[test]
    fn test_custom_thresholds_change_verdict() {
        let config = EngineConfig::default().with_readiness(crate::config::ReadinessThresholds {
            not_ready_score: 0.0,
            ready_score: 0.0,
            ready_max_duration_days: 30,
            not_ready_duration_days: 60,
        });
        let engine = ReadinessEngine::new(config).unwrap();
        let proposal = TestProposal::new("", 0.15, 0.05, 1000, "signup rate");
        let result = engine.analyze(&proposal).unwrap();
        assert_eq!(result.readiness_status, ReadinessStatus::Ready);
    }
}
