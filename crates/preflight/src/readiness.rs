//! Readiness verdict and recommendation merge

use crate::config::ReadinessThresholds;
use crate::design::DesignAnalysis;
use crate::hypothesis::HypothesisAnalysis;
use crate::ordered_set::OrderedSet;
use crate::result::PreflightResult;
use crate::statistical::StatisticalAnalysis;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line emitted for tests that are ready to launch
pub const READY_MESSAGE: &str = "✅ Test is ready to launch! All criteria met.";

/// Final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessStatus {
    /// All criteria met
    Ready,
    /// Launchable after improvements
    NeedsWork,
    /// Critical issues block launch
    NotReady,
}

impl ReadinessStatus {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::NeedsWork => "NEEDS_WORK",
            Self::NotReady => "NOT_READY",
        }
    }

    /// 0 for ready, 2 for not ready
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Ready => 0,
            Self::NeedsWork => 1,
            Self::NotReady => 2,
        }
    }

    /// Whether this verdict is at least as bad as `gate`
    #[must_use]
    pub const fn fails(self, gate: Self) -> bool {
        self.severity() >= gate.severity()
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Self::Ready => READY_MESSAGE,
            Self::NeedsWork => "⚠ Test needs some improvements before launch.",
            Self::NotReady => "❌ Test is not ready. Address critical issues before proceeding.",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete analysis of a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Verdict
    pub readiness_status: ReadinessStatus,
    /// Sample size and duration
    pub statistical_analysis: StatisticalAnalysis,
    /// Hypothesis quality
    pub hypothesis_analysis: HypothesisAnalysis,
    /// Design checks
    pub design_analysis: DesignAnalysis,
    /// Status-specific recommendations
    pub overall_recommendations: Vec<String>,
    /// Planned start, carried from the proposal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_start_date: Option<DateTime<Utc>>,
    /// Start plus the estimated duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_end_date: Option<DateTime<Utc>>,
}

impl AnalysisResult {
    /// Attach a start date and project the end date from it
    #[must_use]
    pub fn with_start_date(mut self, start: Option<DateTime<Utc>>) -> Self {
        self.test_start_date = start;
        self.projected_end_date = start.and_then(|start| {
            let days = i64::try_from(self.statistical_analysis.estimated_duration_days).ok()?;
            start.checked_add_signed(TimeDelta::try_days(days)?)
        });
        self
    }

    /// Pretty JSON
    pub fn to_json(&self) -> PreflightResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Combines the three analyses into a verdict
#[derive(Debug, Clone, Default)]
pub struct ReadinessAggregator {
    thresholds: ReadinessThresholds,
}

impl ReadinessAggregator {
    /// Aggregator with the given decision thresholds
    #[must_use]
    pub fn new(thresholds: ReadinessThresholds) -> Self {
        Self { thresholds }
    }

    /// Decision table, first matching row wins
    #[must_use]
    pub fn status(
        &self,
        statistical: &StatisticalAnalysis,
        hypothesis: &HypothesisAnalysis,
        design: &DesignAnalysis,
    ) -> ReadinessStatus {
        let t = &self.thresholds;
        let score = hypothesis.overall_score;
        let days = statistical.estimated_duration_days;

        if score < t.not_ready_score || days > t.not_ready_duration_days || design.has_critical_flaw()
        {
            ReadinessStatus::NotReady
        } else if score < t.ready_score || days > t.ready_max_duration_days {
            ReadinessStatus::NeedsWork
        } else {
            ReadinessStatus::Ready
        }
    }

    /// Verdict plus merged recommendations
    #[must_use]
    pub fn aggregate(
        &self,
        statistical: StatisticalAnalysis,
        hypothesis: HypothesisAnalysis,
        design: DesignAnalysis,
    ) -> AnalysisResult {
        let status = self.status(&statistical, &hypothesis, &design);
        let overall_recommendations = recommendations(status, &statistical, &hypothesis, &design);

        AnalysisResult {
            readiness_status: status,
            statistical_analysis: statistical,
            hypothesis_analysis: hypothesis,
            design_analysis: design,
            overall_recommendations,
            test_start_date: None,
            projected_end_date: None,
        }
    }
}

fn recommendations(
    status: ReadinessStatus,
    statistical: &StatisticalAnalysis,
    hypothesis: &HypothesisAnalysis,
    design: &DesignAnalysis,
) -> Vec<String> {
    if status == ReadinessStatus::Ready {
        return vec![READY_MESSAGE.to_string()];
    }

    let mut merged = OrderedSet::new();
    merged.extend(statistical.warnings.iter().cloned());
    merged.extend(hypothesis.concerns().map(str::to_string));
    merged.extend(design.warnings().map(str::to_string));

    if merged.is_empty() {
        merged.insert(status.fallback_message().to_string());
    }
    merged.into_vec()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::hypothesis::Dimension;

    fn statistical(days: u64, warnings: &[&str]) -> StatisticalAnalysis {
        StatisticalAnalysis {
            required_sample_size: 1000,
            estimated_duration_days: days,
            samples_per_day_needed: 1000_u64.div_ceil(days),
            confidence_level: 0.95,
            statistical_power: 0.8,
            daily_traffic_per_variation: 500,
            pooled_proportion: 0.2,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }

    fn hypothesis(score: f64, feedback: &[&str]) -> HypothesisAnalysis {
        HypothesisAnalysis {
            overall_score: score,
            specificity_score: score / 4.0,
            measurability_score: score / 4.0,
            directionality_score: score / 4.0,
            rationale_score: score / 4.0,
            feedback: feedback.iter().map(ToString::to_string).collect(),
            improved_hypothesis: String::new(),
            weakest_dimension: Dimension::Specificity,
        }
    }

    fn design(variation: bool, traffic: bool) -> DesignAnalysis {
        DesignAnalysis {
            variation_count_warning: variation.then(|| "too many variations".to_string()),
            traffic_allocation_warning: traffic.then(|| "thin traffic".to_string()),
            metric_warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn status(score: f64, days: u64, variation: bool, traffic: bool) -> ReadinessStatus {
        ReadinessAggregator::default().status(
            &statistical(days, &[]),
            &hypothesis(score, &[]),
            &design(variation, traffic),
        )
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(status(8.0, 10, false, false), ReadinessStatus::Ready);
        assert_eq!(status(7.0, 29, false, false), ReadinessStatus::Ready);
        assert_eq!(status(6.9, 10, false, false), ReadinessStatus::NeedsWork);
        assert_eq!(status(5.0, 10, false, false), ReadinessStatus::NeedsWork);
        assert_eq!(status(4.99, 10, false, false), ReadinessStatus::NotReady);
        assert_eq!(status(9.0, 30, false, false), ReadinessStatus::Ready);
        assert_eq!(status(9.0, 31, false, false), ReadinessStatus::NeedsWork);
        assert_eq!(status(9.0, 60, false, false), ReadinessStatus::NeedsWork);
        assert_eq!(status(9.0, 61, false, false), ReadinessStatus::NotReady);
    }

    #[test]
    fn test_critical_flaw_needs_both_warnings() {
        assert_eq!(status(10.0, 5, true, true), ReadinessStatus::NotReady);
        assert_eq!(status(10.0, 5, true, false), ReadinessStatus::Ready);
        assert_eq!(status(10.0, 5, false, true), ReadinessStatus::Ready);
    }

    #[test]
    fn test_ready_emits_single_line() {
        let result = ReadinessAggregator::default().aggregate(
            statistical(3, &["ignored"]),
            hypothesis(9.0, &[]),
            design(false, false),
        );
        assert_eq!(result.readiness_status, ReadinessStatus::Ready);
        assert_eq!(result.overall_recommendations, vec![READY_MESSAGE]);
    }

    #[test]
    fn test_merge_order_and_dedup() {
        let mut d = design(true, true);
        d.metric_warnings = vec!["metric".to_string(), "stat".to_string()];
        let result = ReadinessAggregator::default().aggregate(
            statistical(3, &["stat"]),
            hypothesis(4.0, &["✓ good", "⚠ weak", "⚠ weak"]),
            d,
        );
        assert_eq!(result.readiness_status, ReadinessStatus::NotReady);
        assert_eq!(
            result.overall_recommendations,
            vec!["stat", "⚠ weak", "too many variations", "thin traffic", "metric"]
        );
    }

    #[test]
    fn test_status_line_when_nothing_to_merge() {
        let result = ReadinessAggregator::default().aggregate(
            statistical(31, &[]),
            hypothesis(9.0, &[]),
            design(false, false),
        );
        assert_eq!(result.readiness_status, ReadinessStatus::NeedsWork);
        assert_eq!(
            result.overall_recommendations,
            vec!["⚠ Test needs some improvements before launch."]
        );
    }

    #[test]
    fn test_status_is_deterministic() {
        let agg = ReadinessAggregator::default();
        let s = statistical(45, &["long"]);
        let h = hypothesis(6.0, &["⚠ weak"]);
        let d = design(false, true);
        assert_eq!(agg.status(&s, &h, &d), agg.status(&s, &h, &d));
        assert_eq!(
            agg.aggregate(s.clone(), h.clone(), d.clone()),
            agg.aggregate(s, h, d)
        );
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&ReadinessStatus::NeedsWork).unwrap();
        assert_eq!(json, "\"NEEDS_WORK\"");
        let back: ReadinessStatus = serde_json::from_str("\"NOT_READY\"").unwrap();
        assert_eq!(back, ReadinessStatus::NotReady);
    }

    #[test]
    fn test_fails_gate() {
        assert!(ReadinessStatus::NotReady.fails(ReadinessStatus::NeedsWork));
        assert!(ReadinessStatus::NeedsWork.fails(ReadinessStatus::NeedsWork));
        assert!(!ReadinessStatus::Ready.fails(ReadinessStatus::NeedsWork));
        assert!(!ReadinessStatus::NeedsWork.fails(ReadinessStatus::NotReady));
    }

    #[test]
    fn test_projected_end_date() {
        let start = DateTime::parse_from_rfc3339("2026-11-02T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let result = ReadinessAggregator::default()
            .aggregate(statistical(14, &[]), hypothesis(9.0, &[]), design(false, false))
            .with_start_date(Some(start));
        let end = result.projected_end_date.unwrap();
        assert_eq!((end - start).num_days(), 14);

        let json = result.to_json().unwrap();
        assert!(json.contains("projected_end_date"));
    }

    #[test]
    fn test_no_start_date_omits_dates() {
        let result = ReadinessAggregator::default()
            .aggregate(statistical(14, &[]), hypothesis(9.0, &[]), design(false, false))
            .with_start_date(None);
        assert!(result.projected_end_date.is_none());
        assert!(!result.to_json().unwrap().contains("test_start_date"));
    }
}
