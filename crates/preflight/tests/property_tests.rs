//! Property-based tests for preflight.
//!
//! Uses proptest to check invariants of the engine over arbitrary proposals.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use preflight::prelude::*;
use preflight::text::tokenize;
use preflight::{HypothesisScorer, OrderedSet, StatisticalAnalyzer, StatisticalConfig};
use proptest::prelude::*;

fn analyzer() -> StatisticalAnalyzer {
    StatisticalAnalyzer::new(StatisticalConfig::default())
}

fn hypothesis_text() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,200}",
        "[a-zA-Z ,.%0-9'\"-]{0,160}",
        Just("Changing the checkout button will increase signups by 5% because of research".to_string()),
    ]
}

// === Statistical Properties ===

proptest! {
    /// Every valid proposal needs at least one sample and one day.
    #[test]
    fn prop_sample_size_and_duration_positive(
        baseline in 0.0001f64..0.9999,
        mde in 0.0001f64..0.9999,
        traffic in 1u64..10_000_000_000,
        variations in 2u32..50,
    ) {
        let stats = analyzer().analyze(baseline, mde, traffic, variations).unwrap();
        prop_assert!(stats.required_sample_size > 0);
        prop_assert!(stats.estimated_duration_days >= 1);
        prop_assert!(stats.samples_per_day_needed > 0);
        prop_assert!(stats.pooled_proportion > 0.0 && stats.pooled_proportion < 1.0);
    }

    /// Larger effects never need more samples.
    #[test]
    fn prop_sample_size_non_increasing_in_mde(
        baseline in 0.001f64..0.999,
        a in 0.001f64..0.999,
        b in 0.001f64..0.999,
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let n_small = analyzer().plan(baseline, small, 1000, 2).required_sample_size;
        let n_large = analyzer().plan(baseline, large, 1000, 2).required_sample_size;
        prop_assert!(n_small >= n_large, "{} < {}", n_small, n_large);
    }

    /// Baselines closer to 0.5 never need fewer samples.
    #[test]
    fn prop_sample_size_non_decreasing_toward_half(
        mde in 0.001f64..0.2,
        t1 in 0.0f64..1.0,
        t2 in 0.0f64..1.0,
    ) {
        let upper = 0.5 - mde / 2.0;
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let b1 = 0.001 + lo * (upper - 0.001);
        let b2 = 0.001 + hi * (upper - 0.001);
        let n1 = analyzer().plan(b1, mde, 1000, 2).required_sample_size;
        let n2 = analyzer().plan(b2, mde, 1000, 2).required_sample_size;
        prop_assert!(n2 >= n1, "baseline {} -> {}, baseline {} -> {}", b1, n1, b2, n2);
    }

    /// Baselines further above 0.5 never need more samples.
    #[test]
    fn prop_sample_size_non_increasing_above_half(
        mde in 0.001f64..0.2,
        t1 in 0.0f64..1.0,
        t2 in 0.0f64..1.0,
    ) {
        let upper = 1.0 - mde;
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let b1 = 0.5 + lo * (upper - 0.5);
        let b2 = 0.5 + hi * (upper - 0.5);
        let n1 = analyzer().plan(b1, mde, 1000, 2).required_sample_size;
        let n2 = analyzer().plan(b2, mde, 1000, 2).required_sample_size;
        prop_assert!(n2 <= n1, "baseline {} -> {}, baseline {} -> {}", b1, n1, b2, n2);
    }

    /// Duration covers the sample size at the allocated traffic.
    #[test]
    fn prop_duration_never_under_provisions(
        baseline in 0.01f64..0.9,
        mde in 0.005f64..0.5,
        traffic in 2u64..1_000_000,
        variations in 2u32..10,
    ) {
        let plan = analyzer().plan(baseline, mde, traffic, variations);
        prop_assume!(plan.daily_per_variation > 0);
        let covered = plan.estimated_duration_days.saturating_mul(plan.daily_per_variation);
        prop_assert!(covered >= plan.required_sample_size);
    }
}

// === Hypothesis Properties ===

proptest! {
    /// Scores stay within their documented bounds.
    #[test]
    fn prop_scores_bounded(text in hypothesis_text()) {
        let analysis = HypothesisScorer::default().score(&text);
        for score in [
            analysis.specificity_score,
            analysis.measurability_score,
            analysis.directionality_score,
            analysis.rationale_score,
        ] {
            prop_assert!((0.0..=2.5).contains(&score));
        }
        prop_assert!((0.0..=10.0).contains(&analysis.overall_score));
        prop_assert!(!analysis.improved_hypothesis.is_empty());
    }

    /// Whitespace-only text scores zero and asks for a rewrite.
    #[test]
    fn prop_blank_scores_zero(text in "[ \t\n]{0,20}") {
        let analysis = HypothesisScorer::default().score(&text);
        prop_assert_eq!(analysis.overall_score, 0.0);
        prop_assert!(analysis.improved_hypothesis.starts_with("No hypothesis provided"));
    }

    /// Scoring ignores letter case.
    #[test]
    fn prop_case_insensitive(text in "[a-zA-Z ,.%0-9]{0,120}") {
        let scorer = HypothesisScorer::default();
        let lower = scorer.score(&text.to_lowercase());
        let upper = scorer.score(&text.to_uppercase());
        prop_assert_eq!(lower.overall_score, upper.overall_score);
    }

    /// Tokens are lowercase and never empty.
    #[test]
    fn prop_tokens_normalized(text in ".{0,120}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}

// === Aggregation Properties ===

proptest! {
    /// Re-running the engine gives the same result.
    #[test]
    fn prop_analysis_deterministic(
        text in hypothesis_text(),
        baseline in 0.01f64..0.9,
        mde in 0.001f64..0.5,
        traffic in 1u64..100_000,
        variations in 2u32..12,
    ) {
        let engine = ReadinessEngine::default();
        let proposal = TestProposal::new(text, baseline, mde, traffic, "signup rate")
            .with_variations(variations);
        let first = engine.analyze(&proposal).unwrap();
        let second = engine.analyze(&proposal).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Recommendations are duplicate-free and follow the verdict.
    #[test]
    fn prop_recommendations_consistent_with_status(
        text in hypothesis_text(),
        baseline in 0.01f64..0.9,
        mde in 0.001f64..0.5,
        traffic in 1u64..100_000,
        variations in 2u32..12,
    ) {
        let proposal = TestProposal::new(text, baseline, mde, traffic, "signup rate")
            .with_variations(variations);
        let result = ReadinessEngine::default().analyze(&proposal).unwrap();

        let recs = &result.overall_recommendations;
        prop_assert!(!recs.is_empty());
        let unique: OrderedSet<&String> = recs.iter().collect();
        prop_assert_eq!(unique.len(), recs.len());

        let score = result.hypothesis_analysis.overall_score;
        let days = result.statistical_analysis.estimated_duration_days;
        let critical = result.design_analysis.has_critical_flaw();
        let expected = if score < 5.0 || days > 60 || critical {
            ReadinessStatus::NotReady
        } else if score < 7.0 || days > 30 {
            ReadinessStatus::NeedsWork
        } else {
            ReadinessStatus::Ready
        };
        prop_assert_eq!(result.readiness_status, expected);
    }
}
