//! Sample size and duration analysis
//!
//! Two-sample proportion test with fixed critical values:
//!
//! ```text
//! p = (baseline + min(baseline + mde, 1)) / 2
//! n = ceil( 2 (z_alpha/2 + z_beta)^2 p (1 - p) / mde^2 )      per variation
//! duration = ceil( n / floor(daily_traffic / variations) )     days, >= 1
//! ```
//!
//! Arithmetic runs in `f64` and is saturated into `u64`, so very large
//! traffic or vanishing effects cannot overflow. Sample size and duration
//! always round up.

use crate::config::StatisticalConfig;
use crate::proposal::validate_sizing;
use crate::result::PreflightResult;
use serde::{Deserialize, Serialize};

/// Result of the statistical analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalAnalysis {
    /// Required sample size per variation
    pub required_sample_size: u64,
    /// Estimated test duration in days
    pub estimated_duration_days: u64,
    /// Samples each variation must collect per day to finish on time
    pub samples_per_day_needed: u64,
    /// Confidence level (1 - alpha)
    pub confidence_level: f64,
    /// Statistical power (1 - beta)
    pub statistical_power: f64,
    /// Visitors each variation receives per day
    pub daily_traffic_per_variation: u64,
    /// Pooled proportion used in the variance estimate
    pub pooled_proportion: f64,
    /// Statistical warnings
    pub warnings: Vec<String>,
}

/// Intermediate sizing shared by the statistical and design checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePlan {
    /// Expected treatment rate after clamping to 1
    pub treatment_rate: f64,
    /// Midpoint of control and treatment rates
    pub pooled_proportion: f64,
    /// Whether `baseline + mde` had to be clamped
    pub treatment_clamped: bool,
    /// Per-variation sample size
    pub required_sample_size: u64,
    /// `floor(daily_traffic / variations)`
    pub daily_per_variation: u64,
    /// Days needed to fill every variation
    pub estimated_duration_days: u64,
    /// Per-variation samples per day over the estimated duration
    pub samples_per_day_needed: u64,
}

impl SamplePlan {
    /// Size a test from its numeric parameters
    #[must_use]
    pub fn compute(
        config: &StatisticalConfig,
        baseline_rate: f64,
        mde: f64,
        daily_traffic: u64,
        num_variations: u32,
    ) -> Self {
        let raw_treatment = baseline_rate + mde;
        let treatment_clamped = raw_treatment > 1.0;
        let treatment_rate = raw_treatment.min(1.0);
        let pooled_proportion = (baseline_rate + treatment_rate) / 2.0;

        let z_sum = config.z_alpha_half + config.z_beta;
        let raw_n = 2.0 * z_sum * z_sum * pooled_proportion * (1.0 - pooled_proportion) / (mde * mde);
        let required_sample_size = ceil_to_u64(raw_n).max(config.min_sample_size).max(1);

        let variations = u64::from(num_variations.max(1));
        let daily_per_variation = daily_traffic / variations;

        let estimated_duration_days = if daily_per_variation > 0 {
            required_sample_size.div_ceil(daily_per_variation)
        } else {
            // Fractional share: fewer visitors per day than variations
            let share = daily_traffic as f64 / variations as f64;
            ceil_to_u64(required_sample_size as f64 / share)
        }
        .max(1);

        let samples_per_day_needed = required_sample_size.div_ceil(estimated_duration_days);

        Self {
            treatment_rate,
            pooled_proportion,
            treatment_clamped,
            required_sample_size,
            daily_per_variation,
            estimated_duration_days,
            samples_per_day_needed,
        }
    }
}

/// Round up into `u64`, saturating on overflow and non-finite input
fn ceil_to_u64(value: f64) -> u64 {
    if value.is_nan() {
        return u64::MAX;
    }
    // `as` saturates for out-of-range floats
    value.ceil() as u64
}

/// Statistical analyzer
#[derive(Debug, Clone, Default)]
pub struct StatisticalAnalyzer {
    config: StatisticalConfig,
}

impl StatisticalAnalyzer {
    /// Create an analyzer with the given constants
    #[must_use]
    pub fn new(config: StatisticalConfig) -> Self {
        Self { config }
    }

    /// Constants in use
    #[must_use]
    pub fn config(&self) -> &StatisticalConfig {
        &self.config
    }

    /// Size the test without producing warnings
    ///
    /// Inputs are not checked; a zero MDE saturates to `u64::MAX` samples.
    #[must_use]
    pub fn plan(
        &self,
        baseline_rate: f64,
        mde: f64,
        daily_traffic: u64,
        num_variations: u32,
    ) -> SamplePlan {
        SamplePlan::compute(&self.config, baseline_rate, mde, daily_traffic, num_variations)
    }

    /// Compute sample size, duration and warnings
    ///
    /// # Errors
    ///
    /// Returns [`crate::PreflightError::InvalidInput`] when a rate is outside
    /// (0, 1), traffic is zero or there are fewer than two variations.
    pub fn analyze(
        &self,
        baseline_rate: f64,
        mde: f64,
        daily_traffic: u64,
        num_variations: u32,
    ) -> PreflightResult<StatisticalAnalysis> {
        validate_sizing(baseline_rate, mde, daily_traffic, num_variations)?;
        let plan = self.plan(baseline_rate, mde, daily_traffic, num_variations);
        let warnings = self.warnings(&plan, baseline_rate, mde, daily_traffic, num_variations);

        tracing::debug!(
            required_sample_size = plan.required_sample_size,
            estimated_duration_days = plan.estimated_duration_days,
            daily_per_variation = plan.daily_per_variation,
            pooled_proportion = plan.pooled_proportion,
            warnings = warnings.len(),
            "statistical analysis complete"
        );

        Ok(StatisticalAnalysis {
            required_sample_size: plan.required_sample_size,
            estimated_duration_days: plan.estimated_duration_days,
            samples_per_day_needed: plan.samples_per_day_needed,
            confidence_level: self.config.confidence_level,
            statistical_power: self.config.statistical_power,
            daily_traffic_per_variation: plan.daily_per_variation,
            pooled_proportion: plan.pooled_proportion,
            warnings,
        })
    }

    fn warnings(
        &self,
        plan: &SamplePlan,
        baseline_rate: f64,
        mde: f64,
        daily_traffic: u64,
        num_variations: u32,
    ) -> Vec<String> {
        let c = &self.config;
        let mut warnings = Vec::new();

        if plan.treatment_clamped {
            tracing::warn!(baseline_rate, mde, "expected treatment rate clamped to 1.0");
            warnings.push(format!(
                "Expected treatment rate ({:.1}%) exceeds 100%; it was clamped to 100% for the \
                 variance estimate. Re-check the baseline rate and MDE.",
                (baseline_rate + mde) * 100.0
            ));
        }

        let days = plan.estimated_duration_days;
        if days > c.significance_horizon_days {
            warnings.push(format!(
                "Daily traffic ({daily_traffic}) is too low to reach significance within {} days \
                 (estimated {days} days). Increase traffic, reduce variations, or raise the MDE.",
                c.significance_horizon_days
            ));
        } else if days > c.max_duration_days {
            warnings.push(format!(
                "Test duration is {days} days, which may be too long. \
                 Consider increasing traffic or reducing MDE."
            ));
        } else if days > c.review_duration_days {
            warnings.push(format!(
                "Test duration is {days} days. \
                 Consider if this timeline is acceptable for your business."
            ));
        }

        let relative_mde = mde / baseline_rate;
        if mde < c.small_absolute_mde || relative_mde < c.small_relative_mde {
            warnings.push(format!(
                "Very small MDE detected ({mde} absolute, {:.1}% of baseline). This may require \
                 very large sample sizes and long test durations.",
                relative_mde * 100.0
            ));
        } else if mde > c.large_mde {
            warnings.push(
                "Large MDE detected. This may indicate unrealistic expectations for the test impact."
                    .to_string(),
            );
        }

        if baseline_rate < c.low_baseline_rate {
            warnings.push(
                "Very low baseline conversion rate. Consider if the metric is appropriate for testing."
                    .to_string(),
            );
        }

        if plan.daily_per_variation < c.near_zero_daily_per_variation {
            warnings.push(format!(
                "Only {} visitor(s) per variation per day across {num_variations} variations; \
                 per-variation traffic is near zero.",
                plan.daily_per_variation
            ));
        }

        warnings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn analyzer() -> StatisticalAnalyzer {
        StatisticalAnalyzer::default()
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        for (baseline, mde, traffic, variations) in [
            (0.15, 0.0, 1000, 2),
            (0.15, f64::NAN, 1000, 2),
            (0.0, 0.05, 1000, 2),
            (1.0, 0.05, 1000, 2),
            (0.15, 0.05, 0, 2),
            (0.15, 0.05, 1000, 1),
        ] {
            let err = analyzer()
                .analyze(baseline, mde, traffic, variations)
                .unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
    }

    #[test]
    fn test_reference_sample_size() {
        // p = 0.175, 2 * 2.8^2 * 0.175 * 0.825 / 0.05^2 = 905.52
        let result = analyzer().analyze(0.15, 0.05, 1000, 2).unwrap();
        assert_eq!(result.required_sample_size, 906);
        assert_eq!(result.daily_traffic_per_variation, 500);
        assert_eq!(result.estimated_duration_days, 2);
        assert_eq!(result.samples_per_day_needed, 453);
        assert!((result.pooled_proportion - 0.175).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_confidence_and_power() {
        let result = analyzer().analyze(0.15, 0.05, 1000, 2).unwrap();
        assert_eq!(result.confidence_level, 0.95);
        assert_eq!(result.statistical_power, 0.8);
    }

    #[test]
    fn test_clean_proposal_has_no_warnings() {
        let result = analyzer().analyze(0.15, 0.05, 1000, 2).unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_minimum_sample_size_floor() {
        let result = analyzer().analyze(0.5, 0.45, 1000, 2).unwrap();
        assert_eq!(result.required_sample_size, 100);
    }

    #[test]
    fn test_duration_at_least_one_day() {
        let result = analyzer().analyze(0.3, 0.2, 10_000_000, 2).unwrap();
        assert_eq!(result.estimated_duration_days, 1);
    }

    #[test]
    fn test_treatment_rate_clamped_with_warning() {
        let plan = analyzer().plan(0.8, 0.4, 1000, 2);
        assert!(plan.treatment_clamped);
        assert_eq!(plan.treatment_rate, 1.0);
        assert!((plan.pooled_proportion - 0.9).abs() < 1e-12);

        let result = analyzer().analyze(0.8, 0.4, 1000, 2).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("clamped")));
    }

    #[test]
    fn test_very_small_mde_warns_and_runs_long() {
        let result = analyzer().analyze(0.1, 0.005, 1000, 2).unwrap();
        assert!(result.estimated_duration_days > 60);
        assert!(result.warnings.iter().any(|w| w.contains("Very small MDE")));
        assert!(result.warnings.iter().any(|w| w.contains("too low to reach significance")));
    }

    #[test]
    fn test_duration_review_band() {
        // 2941 per variation at 90/day per variation
        let result = analyzer().analyze(0.2, 0.03, 180, 2).unwrap();
        assert!(result.estimated_duration_days > 30);
        assert!(result.estimated_duration_days <= 60);
        assert!(result.warnings.iter().any(|w| w.contains("timeline is acceptable")));
    }

    #[test]
    fn test_large_mde_warning() {
        let result = analyzer().analyze(0.2, 0.6, 1000, 2).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Large MDE")));
    }

    #[test]
    fn test_relative_mde_warning() {
        // 0.02 absolute is fine on its own but only 4% of a 0.5 baseline
        let result = analyzer().analyze(0.5, 0.02, 100_000, 2).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Very small MDE")));
    }

    #[test]
    fn test_low_baseline_warning() {
        let result = analyzer().analyze(0.005, 0.01, 1_000_000, 2).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Very low baseline")));
    }

    #[test]
    fn test_fewer_visitors_than_variations() {
        let result = analyzer().analyze(0.2, 0.1, 3, 5).unwrap();
        assert_eq!(result.daily_traffic_per_variation, 0);
        assert!(result.estimated_duration_days >= result.required_sample_size);
        assert!(result.warnings.iter().any(|w| w.contains("near zero")));
    }

    #[test]
    fn test_extreme_values_saturate() {
        let result = analyzer().analyze(0.5, 1e-12, u64::MAX, 2).unwrap();
        assert!(result.required_sample_size > 0);
        assert!(result.estimated_duration_days >= 1);

        let result = analyzer().analyze(0.5, 1e-300, 1, 2).unwrap();
        assert_eq!(result.required_sample_size, u64::MAX);
        assert!(result.estimated_duration_days >= 1);
    }

    #[test]
    fn test_baselines_above_half_need_fewer_samples() {
        let sizes: Vec<u64> = [0.55, 0.7, 0.9]
            .into_iter()
            .map(|b| analyzer().plan(b, 0.05, 1000, 2).required_sample_size)
            .collect();
        assert_eq!(sizes, vec![1533, 1251, 436]);
    }

    #[test]
    fn test_more_variations_take_longer() {
        let two = analyzer().analyze(0.1, 0.02, 2000, 2).unwrap();
        let four = analyzer().analyze(0.1, 0.02, 2000, 4).unwrap();
        assert_eq!(two.required_sample_size, four.required_sample_size);
        assert!(four.estimated_duration_days > two.estimated_duration_days);
    }

    #[test]
    fn test_stricter_targets_need_more_samples() {
        let strict = StatisticalAnalyzer::new(StatisticalConfig {
            z_alpha_half: 2.576,
            z_beta: 1.2816,
            ..StatisticalConfig::default()
        });
        let default = analyzer().analyze(0.15, 0.05, 1000, 2).unwrap();
        let stricter = strict.analyze(0.15, 0.05, 1000, 2).unwrap();
        assert!(stricter.required_sample_size > default.required_sample_size);
    }
}
