//! Engine configuration
//!
//! Every constant the engine relies on lives here. [`EngineConfig::default`]
//! reproduces the fixed design parameters; alternate values exist so tests
//! can exercise other confidence/power targets without touching the logic.

use crate::result::{PreflightError, PreflightResult};
use serde::{Deserialize, Serialize};

/// Constants for the sample-size and duration calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalConfig {
    /// Critical value for a two-sided test at alpha = 0.05
    pub z_alpha_half: f64,
    /// Critical value for power = 0.80
    pub z_beta: f64,
    /// Reported confidence level (1 - alpha)
    pub confidence_level: f64,
    /// Reported statistical power
    pub statistical_power: f64,
    /// Floor applied to the per-variation sample size
    pub min_sample_size: u64,
    /// Duration above which the timeline should be confirmed
    pub review_duration_days: u64,
    /// Duration above which the test is considered too long
    pub max_duration_days: u64,
    /// Horizon past which traffic is deemed too low to reach significance
    pub significance_horizon_days: u64,
    /// Absolute MDE below which samples become impractically large
    pub small_absolute_mde: f64,
    /// MDE relative to the baseline below which samples become impractically large
    pub small_relative_mde: f64,
    /// MDE above which expectations look unrealistic
    pub large_mde: f64,
    /// Baseline rate below which the metric is questionable
    pub low_baseline_rate: f64,
    /// Per-variation daily traffic treated as "near zero"
    pub near_zero_daily_per_variation: u64,
}

impl Default for StatisticalConfig {
    fn default() -> Self {
        Self {
            z_alpha_half: 1.96,
            z_beta: 0.84,
            confidence_level: 0.95,
            statistical_power: 0.8,
            min_sample_size: 100,
            review_duration_days: 30,
            max_duration_days: 60,
            significance_horizon_days: 90,
            small_absolute_mde: 0.01,
            small_relative_mde: 0.05,
            large_mde: 0.5,
            low_baseline_rate: 0.01,
            near_zero_daily_per_variation: 10,
        }
    }
}

/// Caps and cut-offs for hypothesis scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisConfig {
    /// Maximum score of one dimension
    pub dimension_cap: f64,
    /// Dimension score at or above which no gap feedback is emitted
    pub strong_dimension: f64,
    /// Overall score at or above which no rewrite is suggested
    pub well_structured_score: f64,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            dimension_cap: 2.5,
            strong_dimension: 2.0,
            well_structured_score: 7.0,
        }
    }
}

/// Ceilings and floors for design validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Variation count above which traffic is diluted
    pub max_variations: u32,
    /// Minimum daily visitors per variation
    pub min_daily_per_variation: u64,
    /// Secondary metric count above which false discoveries become likely
    pub max_secondary_metrics: usize,
    /// MDE below which practical significance should be questioned
    pub small_mde_recommendation: f64,
    /// Baseline below which a more common metric is suggested
    pub low_baseline_recommendation: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            max_variations: 4,
            min_daily_per_variation: 100,
            max_secondary_metrics: 5,
            small_mde_recommendation: 0.05,
            low_baseline_recommendation: 0.02,
        }
    }
}

/// Thresholds of the readiness decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessThresholds {
    /// Hypothesis score below which the test is not ready
    pub not_ready_score: f64,
    /// Hypothesis score at or above which the test can be ready
    pub ready_score: f64,
    /// Longest duration (exclusive) that still allows READY
    pub ready_max_duration_days: u64,
    /// Duration above which the test is not ready
    pub not_ready_duration_days: u64,
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        Self {
            not_ready_score: 5.0,
            ready_score: 7.0,
            ready_max_duration_days: 30,
            not_ready_duration_days: 60,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Statistical constants
    pub statistical: StatisticalConfig,
    /// Hypothesis scoring caps
    pub hypothesis: HypothesisConfig,
    /// Design validation ceilings
    pub design: DesignConfig,
    /// Readiness decision thresholds
    pub readiness: ReadinessThresholds,
}

impl EngineConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the statistical constants
    #[must_use]
    pub fn with_statistical(mut self, statistical: StatisticalConfig) -> Self {
        self.statistical = statistical;
        self
    }

    /// Replace the hypothesis caps
    #[must_use]
    pub fn with_hypothesis(mut self, hypothesis: HypothesisConfig) -> Self {
        self.hypothesis = hypothesis;
        self
    }

    /// Replace the design ceilings
    #[must_use]
    pub fn with_design(mut self, design: DesignConfig) -> Self {
        self.design = design;
        self
    }

    /// Replace the readiness thresholds
    #[must_use]
    pub fn with_readiness(mut self, readiness: ReadinessThresholds) -> Self {
        self.readiness = readiness;
        self
    }

    /// Override the critical values (e.g. 2.576 / 1.2816 for 99% / 90%)
    #[must_use]
    pub fn with_critical_values(
        mut self,
        z_alpha_half: f64,
        z_beta: f64,
        confidence_level: f64,
        statistical_power: f64,
    ) -> Self {
        self.statistical.z_alpha_half = z_alpha_half;
        self.statistical.z_beta = z_beta;
        self.statistical.confidence_level = confidence_level;
        self.statistical.statistical_power = statistical_power;
        self
    }

    /// Check internal consistency
    pub fn validate(&self) -> PreflightResult<()> {
        let s = &self.statistical;
        if !(s.z_alpha_half.is_finite() && s.z_alpha_half > 0.0) {
            return Err(PreflightError::config("z_alpha_half must be positive"));
        }
        if !(s.z_beta.is_finite() && s.z_beta > 0.0) {
            return Err(PreflightError::config("z_beta must be positive"));
        }
        if !(0.0..1.0).contains(&s.confidence_level) || !(0.0..1.0).contains(&s.statistical_power)
        {
            return Err(PreflightError::config(
                "confidence_level and statistical_power must be in [0, 1)",
            ));
        }
        if s.review_duration_days > s.max_duration_days
            || s.max_duration_days > s.significance_horizon_days
        {
            return Err(PreflightError::config(
                "duration thresholds must satisfy review <= max <= horizon",
            ));
        }

        let h = &self.hypothesis;
        if h.dimension_cap <= 0.0 || h.strong_dimension > h.dimension_cap {
            return Err(PreflightError::config(
                "dimension_cap must be positive and at least strong_dimension",
            ));
        }

        if self.design.max_variations < 2 {
            return Err(PreflightError::config("max_variations must be at least 2"));
        }

        let r = &self.readiness;
        if r.not_ready_score > r.ready_score {
            return Err(PreflightError::config(
                "not_ready_score must not exceed ready_score",
            ));
        }
        if r.ready_max_duration_days > r.not_ready_duration_days {
            return Err(PreflightError::config(
                "ready_max_duration_days must not exceed not_ready_duration_days",
            ));
        }
        Ok(())
    }
}
