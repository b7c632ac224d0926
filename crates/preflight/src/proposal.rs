//! Test proposal input record

use crate::result::{PreflightError, PreflightResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const fn default_variations() -> u32 {
    2
}

/// A proposed A/B test, as submitted for readiness analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestProposal {
    /// Free-text hypothesis
    pub hypothesis: String,
    /// Current conversion rate of the control, in (0, 1)
    pub baseline_conversion_rate: f64,
    /// Smallest absolute rate change worth detecting, in (0, 1)
    pub minimum_detectable_effect: f64,
    /// Visitors entering the test per day
    pub daily_traffic: u64,
    /// Control plus treatments
    #[serde(default = "default_variations")]
    pub number_of_variations: u32,
    /// Metric that decides the test
    pub primary_metric: String,
    /// Metrics monitored alongside the primary one
    #[serde(default)]
    pub secondary_metrics: Vec<String>,
    /// Planned launch date
    #[serde(default)]
    pub test_start_date: Option<DateTime<Utc>>,
}

impl TestProposal {
    /// Create a proposal with two variations and no secondary metrics
    #[must_use]
    pub fn new(
        hypothesis: impl Into<String>,
        baseline_conversion_rate: f64,
        minimum_detectable_effect: f64,
        daily_traffic: u64,
        primary_metric: impl Into<String>,
    ) -> Self {
        Self {
            hypothesis: hypothesis.into(),
            baseline_conversion_rate,
            minimum_detectable_effect,
            daily_traffic,
            number_of_variations: default_variations(),
            primary_metric: primary_metric.into(),
            secondary_metrics: Vec::new(),
            test_start_date: None,
        }
    }

    /// Set the number of variations
    #[must_use]
    pub const fn with_variations(mut self, number_of_variations: u32) -> Self {
        self.number_of_variations = number_of_variations;
        self
    }

    /// Set the secondary metrics
    #[must_use]
    pub fn with_secondary_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the planned start date
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.test_start_date = Some(start);
        self
    }

    /// Reject values that would make the computation meaningless
    ///
    /// An empty hypothesis or primary metric is allowed through: those are
    /// scored and flagged rather than refused.
    pub fn validate(&self) -> PreflightResult<()> {
        validate_sizing(
            self.baseline_conversion_rate,
            self.minimum_detectable_effect,
            self.daily_traffic,
            self.number_of_variations,
        )
    }

    /// Trimmed copy with blank and repeated secondary metrics removed
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut secondary: Vec<String> = Vec::with_capacity(self.secondary_metrics.len());
        for metric in &self.secondary_metrics {
            let metric = metric.trim();
            if !metric.is_empty() && !secondary.iter().any(|m| m == metric) {
                secondary.push(metric.to_string());
            }
        }

        Self {
            hypothesis: self.hypothesis.trim().to_string(),
            primary_metric: self.primary_metric.trim().to_string(),
            secondary_metrics: secondary,
            ..self.clone()
        }
    }

    /// First characters of the hypothesis, for log lines
    #[must_use]
    pub fn hypothesis_preview(&self) -> String {
        const PREVIEW_CHARS: usize = 50;
        let mut preview: String = self.hypothesis.chars().take(PREVIEW_CHARS).collect();
        if self.hypothesis.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

/// Check the numeric inputs of a sample-size calculation
pub(crate) fn validate_sizing(
    baseline_rate: f64,
    mde: f64,
    daily_traffic: u64,
    num_variations: u32,
) -> PreflightResult<()> {
    check_open_unit("baseline_conversion_rate", baseline_rate)?;
    check_open_unit("minimum_detectable_effect", mde)?;

    if daily_traffic == 0 {
        return Err(PreflightError::invalid_input(
            "daily_traffic",
            "must be a positive integer",
        ));
    }
    if num_variations < 2 {
        return Err(PreflightError::invalid_input(
            "number_of_variations",
            format!("must be at least 2 (control + one treatment), got {num_variations}"),
        ));
    }
    Ok(())
}

fn check_open_unit(field: &'static str, value: f64) -> PreflightResult<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(PreflightError::invalid_input(
            field,
            format!("must be strictly between 0 and 1, got {value}"),
        ));
    }
    Ok(())
}
