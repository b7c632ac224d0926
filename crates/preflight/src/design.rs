//! Test design validation
//!
//! Structural checks on variation count, traffic allocation and metric
//! choice. The traffic check sizes the test with the same [`SamplePlan`]
//! the statistical analysis uses, so the two never disagree on duration.

use crate::config::{DesignConfig, StatisticalConfig};
use crate::proposal::TestProposal;
use crate::statistical::SamplePlan;
use crate::text::MatchText;
use serde::{Deserialize, Serialize};

/// Metrics whose per-user variance inflates the required sample
const HIGH_VARIANCE_METRICS: &[&str] = &[
    "revenue",
    "average order value",
    "aov",
    "lifetime value",
    "ltv",
    "time on site",
    "session duration",
    "bounce rate",
];

/// Primary metrics that name an aspiration instead of a measurement
const GENERIC_METRICS: &[&str] = &[
    "success",
    "performance",
    "engagement",
    "impact",
    "results",
    "improvement",
    "kpi",
    "metric",
    "metrics",
    "conversion",
    "conversions",
];

/// Best practices included with every analysis
pub const STANDING_RECOMMENDATIONS: [&str; 4] = [
    "Ensure proper randomization and avoid selection bias in traffic allocation.",
    "Set up proper tracking and analytics before test launch.",
    "Define success criteria and stopping rules before starting the test.",
    "Plan for post-test analysis and implementation of winning variations.",
];

/// Result of design validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignAnalysis {
    /// Too many simultaneous variations
    pub variation_count_warning: Option<String>,
    /// Too little traffic per variation
    pub traffic_allocation_warning: Option<String>,
    /// Metric selection problems
    pub metric_warnings: Vec<String>,
    /// Conditional advice followed by standing best practices
    pub recommendations: Vec<String>,
}

impl DesignAnalysis {
    /// Variation count and traffic allocation problems compound
    #[must_use]
    pub const fn has_critical_flaw(&self) -> bool {
        self.variation_count_warning.is_some() && self.traffic_allocation_warning.is_some()
    }

    /// All warnings, variation first, then traffic, then metrics
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.variation_count_warning
            .iter()
            .chain(self.traffic_allocation_warning.iter())
            .chain(self.metric_warnings.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrafficIssue {
    /// The plan runs past the review duration
    Insufficient,
    /// Each variation gets fewer visitors than the floor
    ThinAllocation,
}

/// Design validator
#[derive(Debug, Clone, Default)]
pub struct DesignValidator {
    config: DesignConfig,
    statistical: StatisticalConfig,
}

impl DesignValidator {
    /// Validator sharing the statistical constants of the analyzer
    #[must_use]
    pub fn new(config: DesignConfig, statistical: StatisticalConfig) -> Self {
        Self {
            config,
            statistical,
        }
    }

    /// Constants in use
    #[must_use]
    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// Validate a proposal's design
    #[must_use]
    pub fn validate(&self, proposal: &TestProposal) -> DesignAnalysis {
        let k = proposal.number_of_variations;
        let variation_count_warning = (k > self.config.max_variations).then(|| {
            format!(
                "Testing {k} variations may dilute traffic and reduce statistical power. \
                 Consider reducing to 2-3 variations for better results."
            )
        });

        let plan = SamplePlan::compute(
            &self.statistical,
            proposal.baseline_conversion_rate,
            proposal.minimum_detectable_effect,
            proposal.daily_traffic,
            k,
        );
        let traffic = self.traffic_issue(&plan);
        let traffic_allocation_warning = traffic.map(|issue| match issue {
            TrafficIssue::Insufficient => format!(
                "Insufficient traffic for {k} variations. Need {} total samples but only have \
                 {} daily traffic ({} days at the current allocation). Consider reducing \
                 variations or increasing traffic.",
                plan.required_sample_size.saturating_mul(u64::from(k)),
                proposal.daily_traffic,
                plan.estimated_duration_days
            ),
            TrafficIssue::ThinAllocation => format!(
                "Traffic per variation ({}) may be too low for reliable results. \
                 Consider reducing variations or increasing traffic.",
                plan.daily_per_variation
            ),
        });

        let metric_warnings = self.metric_warnings(proposal);
        let recommendations = self.recommendations(
            proposal,
            variation_count_warning.is_some(),
            traffic,
            &metric_warnings,
        );

        tracing::debug!(
            variations = k,
            variation_warning = variation_count_warning.is_some(),
            traffic_warning = traffic_allocation_warning.is_some(),
            metric_warnings = metric_warnings.len(),
            "design validated"
        );

        DesignAnalysis {
            variation_count_warning,
            traffic_allocation_warning,
            metric_warnings,
            recommendations,
        }
    }

    fn traffic_issue(&self, plan: &SamplePlan) -> Option<TrafficIssue> {
        if plan.estimated_duration_days > self.statistical.review_duration_days {
            Some(TrafficIssue::Insufficient)
        } else if plan.daily_per_variation < self.config.min_daily_per_variation {
            Some(TrafficIssue::ThinAllocation)
        } else {
            None
        }
    }

    fn metric_warnings(&self, proposal: &TestProposal) -> Vec<String> {
        let mut warnings = Vec::new();
        let primary_name = proposal.primary_metric.trim();
        let primary = MatchText::new(primary_name);

        if primary.is_blank() {
            warnings.push(
                "Primary metric is empty. Name the single metric that decides the test."
                    .to_string(),
            );
        } else if is_generic(&primary) {
            warnings.push(format!(
                "Primary metric '{primary_name}' is too generic. Use a specific, measurable \
                 metric such as 'checkout conversion rate'."
            ));
        }

        if is_high_variance(&primary) {
            warnings.push(format!(
                "Primary metric '{primary_name}' has high variance. \
                 Consider increasing sample size or using a more stable metric."
            ));
        }

        if primary.contains_term("click")
            && !primary.contains_term("rate")
            && !primary.contains_term("ctr")
        {
            warnings.push(
                "Consider using click-through rate instead of raw click counts \
                 for more meaningful comparison."
                    .to_string(),
            );
        }

        for metric in &proposal.secondary_metrics {
            if is_high_variance(&MatchText::new(metric)) {
                warnings.push(format!(
                    "Secondary metric '{metric}' has high variance. \
                     Monitor closely and consider statistical significance carefully."
                ));
            }
        }

        let secondary = proposal.secondary_metrics.len();
        if secondary > self.config.max_secondary_metrics {
            warnings.push(format!(
                "Tracking {secondary} secondary metrics may lead to multiple comparison issues. \
                 Focus on 2-3 key metrics."
            ));
        }

        warnings
    }

    fn recommendations(
        &self,
        proposal: &TestProposal,
        variation_warning: bool,
        traffic: Option<TrafficIssue>,
        metric_warnings: &[String],
    ) -> Vec<String> {
        let mut out = Vec::new();

        if variation_warning {
            out.push(format!(
                "Reduce variations from {} to 2-3 for better statistical power and faster results.",
                proposal.number_of_variations
            ));
        }

        match traffic {
            Some(TrafficIssue::Insufficient) => out.push(
                "Consider running a smaller test first or increasing traffic through marketing \
                 channels before launching the full test."
                    .to_string(),
            ),
            Some(TrafficIssue::ThinAllocation) => out.push(
                "Increase daily traffic or reduce the number of variations to ensure adequate \
                 sample size per variation."
                    .to_string(),
            ),
            None => {}
        }

        if metric_warnings.iter().any(|w| w.contains("high variance")) {
            out.push(
                "Consider using more stable metrics like conversion rates instead of \
                 revenue-based metrics for initial testing."
                    .to_string(),
            );
        }
        if proposal.secondary_metrics.len() > self.config.max_secondary_metrics {
            out.push(
                "Focus on 2-3 key secondary metrics to avoid multiple comparison issues \
                 and maintain statistical rigor."
                    .to_string(),
            );
        }

        if proposal.minimum_detectable_effect < self.config.small_mde_recommendation {
            out.push(
                "Small MDE detected. Consider if this level of change is practically \
                 significant for your business goals."
                    .to_string(),
            );
        }
        if proposal.baseline_conversion_rate < self.config.low_baseline_recommendation {
            out.push(
                "Low baseline conversion rate. Ensure the metric is appropriate for your \
                 traffic volume and consider using a more common metric."
                    .to_string(),
            );
        }

        out.extend(STANDING_RECOMMENDATIONS.iter().map(ToString::to_string));
        out
    }
}

fn is_high_variance(metric: &MatchText) -> bool {
    HIGH_VARIANCE_METRICS.iter().any(|m| metric.contains_term(m))
}

/// The whole metric is one generic word
fn is_generic(metric: &MatchText) -> bool {
    match metric.tokens() {
        [only] => GENERIC_METRICS.contains(&only.as_str()),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn validator() -> DesignValidator {
        DesignValidator::default()
    }

    fn proposal() -> TestProposal {
        TestProposal::new("h", 0.15, 0.05, 1000, "checkout conversion rate")
    }

    #[test]
    fn test_clean_design() {
        let analysis = validator().validate(&proposal());
        assert!(analysis.variation_count_warning.is_none());
        assert!(analysis.traffic_allocation_warning.is_none());
        assert!(analysis.metric_warnings.is_empty());
        assert!(!analysis.has_critical_flaw());
        assert_eq!(analysis.recommendations.len(), 4);
    }

    #[test]
    fn test_standing_recommendations_always_last() {
        let p = proposal().with_variations(8);
        let analysis = validator().validate(&p);
        let tail = &analysis.recommendations[analysis.recommendations.len() - 4..];
        assert_eq!(tail, STANDING_RECOMMENDATIONS);
        assert!(analysis.recommendations[0].starts_with("Reduce variations from 8"));
    }

    #[test]
    fn test_variation_ceiling() {
        let at_limit = validator().validate(&proposal().with_variations(4));
        assert!(at_limit.variation_count_warning.is_none());

        let over = validator().validate(&proposal().with_variations(5));
        assert!(over
            .variation_count_warning
            .unwrap()
            .starts_with("Testing 5 variations"));
    }

    #[test]
    fn test_thin_allocation() {
        // 10 variations x 50 visitors: plan finishes in 19 days but each arm is thin
        let p = TestProposal::new("h", 0.15, 0.05, 500, "signup rate").with_variations(10);
        let analysis = validator().validate(&p);
        assert!(analysis
            .traffic_allocation_warning
            .as_deref()
            .unwrap()
            .starts_with("Traffic per variation (50)"));
        assert!(analysis.has_critical_flaw());
    }

    #[test]
    fn test_insufficient_traffic_uses_shared_plan() {
        let p = TestProposal::new("h", 0.1, 0.005, 1000, "signup rate");
        let plan = SamplePlan::compute(&StatisticalConfig::default(), 0.1, 0.005, 1000, 2);
        assert!(plan.estimated_duration_days > 30);

        let analysis = validator().validate(&p);
        let warning = analysis.traffic_allocation_warning.clone().unwrap();
        assert!(warning.starts_with("Insufficient traffic for 2 variations"));
        assert!(warning.contains(&format!("{} days", plan.estimated_duration_days)));
        assert!(!analysis.has_critical_flaw());
    }

    #[test]
    fn test_empty_primary_metric() {
        let mut p = proposal();
        p.primary_metric = "   ".to_string();
        let analysis = validator().validate(&p);
        assert!(analysis.metric_warnings[0].starts_with("Primary metric is empty"));
    }

    #[test]
    fn test_generic_primary_metric() {
        let mut p = proposal();
        p.primary_metric = "Engagement".to_string();
        let analysis = validator().validate(&p);
        assert!(analysis.metric_warnings[0].contains("too generic"));
    }

    #[test]
    fn test_high_variance_metrics() {
        let p = TestProposal::new("h", 0.15, 0.05, 1000, "Revenue per visitor")
            .with_secondary_metrics(["session duration", "signup rate"]);
        let analysis = validator().validate(&p);
        assert_eq!(analysis.metric_warnings.len(), 2);
        assert!(analysis.metric_warnings[0].starts_with("Primary metric 'Revenue per visitor'"));
        assert!(analysis.metric_warnings[1].starts_with("Secondary metric 'session duration'"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.starts_with("Consider using more stable metrics")));
    }

    #[test]
    fn test_raw_clicks_flagged() {
        let mut p = proposal();
        p.primary_metric = "button clicks".to_string();
        let analysis = validator().validate(&p);
        assert!(analysis.metric_warnings[0].contains("click-through rate"));

        p.primary_metric = "click-through rate".to_string();
        assert!(validator().validate(&p).metric_warnings.is_empty());
    }

    #[test]
    fn test_too_many_secondary_metrics() {
        let p = proposal().with_secondary_metrics(["a", "b", "c", "d", "e", "f"]);
        let analysis = validator().validate(&p);
        assert!(analysis.metric_warnings[0].starts_with("Tracking 6 secondary metrics"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.starts_with("Focus on 2-3 key secondary metrics")));
    }

    #[test]
    fn test_small_mde_and_low_baseline_recommendations() {
        let p = TestProposal::new("h", 0.01, 0.02, 100_000, "signup rate");
        let analysis = validator().validate(&p);
        assert!(analysis.recommendations.iter().any(|r| r.starts_with("Small MDE")));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.starts_with("Low baseline conversion rate")));
    }

    #[test]
    fn test_warnings_order() {
        let mut p = TestProposal::new("h", 0.15, 0.05, 500, "clicks").with_variations(10);
        p.secondary_metrics = vec!["ltv".to_string()];
        let analysis = validator().validate(&p);
        let warnings: Vec<&str> = analysis.warnings().collect();
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].starts_with("Testing 10"));
        assert!(warnings[1].starts_with("Traffic per variation"));
        assert!(warnings[2].contains("click-through rate"));
        assert!(warnings[3].starts_with("Secondary metric 'ltv'"));
    }
}
