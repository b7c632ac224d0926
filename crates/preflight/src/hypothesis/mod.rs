//! Hypothesis quality scoring
//!
//! Four independent dimensions, each an ordered list of [`ScoringRule`]s:
//!
//! | Dimension | Looks for |
//! |-----------|-----------|
//! | Specificity | UI elements, user actions, quoted names |
//! | Measurability | quantitative terms, numbers, named metrics |
//! | Directionality | a predicted direction and its magnitude |
//! | Rationale | causal connectors and supporting evidence |
//!
//! A dimension scores the sum of its rule contributions, clamped to
//! `[0, dimension_cap]`. The overall score is the sum of the four.

pub mod rewrite;
pub mod rules;

pub use rules::{RuleOutcome, ScoringRule};

use crate::config::HypothesisConfig;
use crate::text::MatchText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// What exactly is changing
    Specificity,
    /// How the outcome is measured
    Measurability,
    /// Which way the metric is expected to move
    Directionality,
    /// Why the change should work
    Rationale,
}

impl Dimension {
    /// All dimensions, in scoring and tie-break order
    pub const ALL: [Self; 4] = [
        Self::Specificity,
        Self::Measurability,
        Self::Directionality,
        Self::Rationale,
    ];

    /// Position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Specificity => 0,
            Self::Measurability => 1,
            Self::Directionality => 2,
            Self::Rationale => 3,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Specificity => "Specificity",
            Self::Measurability => "Measurability",
            Self::Directionality => "Directionality",
            Self::Rationale => "Rationale",
        }
    }

    /// Feedback line when the dimension is weak
    #[must_use]
    pub const fn gap_message(self) -> &'static str {
        match self {
            Self::Specificity => "⚠ No specific UI element or user action mentioned",
            Self::Measurability => "⚠ No quantitative metric or measurement mentioned",
            Self::Directionality => "⚠ No clear directional prediction",
            Self::Rationale => "⚠ No clear reasoning provided",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of hypothesis scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisAnalysis {
    /// Sum of the four dimension scores, 0 to 10
    pub overall_score: f64,
    /// Specificity, 0 to 2.5
    pub specificity_score: f64,
    /// Measurability, 0 to 2.5
    pub measurability_score: f64,
    /// Directionality, 0 to 2.5
    pub directionality_score: f64,
    /// Rationale, 0 to 2.5
    pub rationale_score: f64,
    /// `✓` findings and `⚠` gaps, in dimension order
    pub feedback: Vec<String>,
    /// Suggested rewrite, or a no-changes message
    pub improved_hypothesis: String,
    /// Lowest-scoring dimension
    pub weakest_dimension: Dimension,
}

impl HypothesisAnalysis {
    /// Score of one dimension
    #[must_use]
    pub const fn score(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Specificity => self.specificity_score,
            Dimension::Measurability => self.measurability_score,
            Dimension::Directionality => self.directionality_score,
            Dimension::Rationale => self.rationale_score,
        }
    }

    /// Warning-style feedback lines only
    pub fn concerns(&self) -> impl Iterator<Item = &str> {
        self.feedback
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with('⚠'))
    }
}

/// Rule-based hypothesis scorer
#[derive(Debug)]
pub struct HypothesisScorer {
    config: HypothesisConfig,
    rules: [Vec<Box<dyn ScoringRule>>; 4],
}

impl Default for HypothesisScorer {
    fn default() -> Self {
        Self::new(HypothesisConfig::default())
    }
}

impl HypothesisScorer {
    /// Scorer with the built-in rule tables
    #[must_use]
    pub fn new(config: HypothesisConfig) -> Self {
        Self {
            config,
            rules: Dimension::ALL.map(rules::default_rules),
        }
    }

    /// Replace the rules of one dimension
    #[must_use]
    pub fn with_rules(mut self, dimension: Dimension, rules: Vec<Box<dyn ScoringRule>>) -> Self {
        self.rules[dimension.index()] = rules;
        self
    }

    /// Constants in use
    #[must_use]
    pub fn config(&self) -> &HypothesisConfig {
        &self.config
    }

    /// Score hypothesis text
    #[must_use]
    pub fn score(&self, hypothesis: &str) -> HypothesisAnalysis {
        let text = MatchText::new(hypothesis);
        let mut scores = [0.0_f64; 4];
        let mut feedback = Vec::new();

        if text.is_blank() {
            feedback.push("⚠ Hypothesis is empty".to_string());
        }

        for dimension in Dimension::ALL {
            let mut total = 0.0;
            for rule in &self.rules[dimension.index()] {
                let outcome = rule.evaluate(&text);
                total += outcome.contribution;
                feedback.extend(outcome.feedback);
            }
            let score = total.clamp(0.0, self.config.dimension_cap);
            if score < self.config.strong_dimension {
                feedback.push(dimension.gap_message().to_string());
            }
            scores[dimension.index()] = score;
        }

        let vague = rewrite::vague_words(&text);
        if !vague.is_empty() {
            feedback.push(format!("⚠ Vague language detected: {}", vague.join(", ")));
        }

        let weakest = weakest_dimension(&scores);
        let overall_score: f64 = scores.iter().sum();
        let improved_hypothesis = rewrite::suggest(&self.config, &text, &scores, weakest);

        tracing::debug!(
            overall_score,
            specificity = scores[0],
            measurability = scores[1],
            directionality = scores[2],
            rationale = scores[3],
            weakest = weakest.label(),
            "hypothesis scored"
        );

        HypothesisAnalysis {
            overall_score,
            specificity_score: scores[0],
            measurability_score: scores[1],
            directionality_score: scores[2],
            rationale_score: scores[3],
            feedback,
            improved_hypothesis,
            weakest_dimension: weakest,
        }
    }
}

/// Lowest score; earlier dimensions win ties
fn weakest_dimension(scores: &[f64; 4]) -> Dimension {
    let mut weakest = Dimension::Specificity;
    for dimension in Dimension::ALL {
        if scores[dimension.index()] < scores[weakest.index()] {
            weakest = dimension;
        }
    }
    weakest
}
