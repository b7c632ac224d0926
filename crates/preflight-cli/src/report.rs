//! Analysis report rendering

use crate::output::styled_status;
use preflight::{AnalysisResult, Dimension, HypothesisAnalysis, HypothesisConfig};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

fn dimension_symbol(score: f64, scale: &HypothesisConfig) -> &'static str {
    if score >= scale.strong_dimension {
        "✓"
    } else if score > 0.0 {
        "⚠"
    } else {
        "✗"
    }
}

fn push_dimension_table(
    output: &mut String,
    hypothesis: &HypothesisAnalysis,
    scale: &HypothesisConfig,
) {
    output.push_str("┌─────────────────┬─────────┬──────────┐\n");
    output.push_str("│ Dimension       │ Score   │ Status   │\n");
    output.push_str("├─────────────────┼─────────┼──────────┤\n");
    for dimension in Dimension::ALL {
        let score = hypothesis.score(dimension);
        output.push_str(&format!(
            "│ {:<15} │ {:>3.1}/{:<3} │ {:<8} │\n",
            dimension.label(),
            score,
            scale.dimension_cap,
            dimension_symbol(score, scale)
        ));
    }
    output.push_str("└─────────────────┴─────────┴──────────┘\n");
}

/// Render an analysis as a text report
///
/// `scale` is the scorer configuration the result was produced with; it sets
/// the per-dimension maximum and the strong-dimension mark in the table.
#[must_use]
pub fn render_analysis_text(
    result: &AnalysisResult,
    scale: &HypothesisConfig,
    detailed: bool,
    use_color: bool,
) -> String {
    let stats = &result.statistical_analysis;
    let hypothesis = &result.hypothesis_analysis;
    let design = &result.design_analysis;
    let mut output = String::new();

    output.push_str("A/B TEST READINESS\n");
    output.push_str(RULE);
    output.push('\n');
    output.push_str(&format!(
        "Status: {}\n\n",
        styled_status(result.readiness_status, use_color)
    ));

    output.push_str("Statistics:\n");
    output.push_str(&format!(
        "  Sample size per variation: {}\n",
        stats.required_sample_size
    ));
    output.push_str(&format!(
        "  Estimated duration:        {} day{}\n",
        stats.estimated_duration_days,
        if stats.estimated_duration_days == 1 { "" } else { "s" }
    ));
    output.push_str(&format!(
        "  Samples per day needed:    {}\n",
        stats.samples_per_day_needed
    ));
    output.push_str(&format!(
        "  Confidence / power:        {:.0}% / {:.0}%\n",
        stats.confidence_level * 100.0,
        stats.statistical_power * 100.0
    ));
    if let (Some(start), Some(end)) = (result.test_start_date, result.projected_end_date) {
        output.push_str(&format!(
            "  Schedule:                  {} → {}\n",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "Hypothesis Score: {:.1}/10 (weakest: {})\n",
        hypothesis.overall_score, hypothesis.weakest_dimension
    ));
    push_dimension_table(&mut output, hypothesis, scale);
    output.push('\n');

    output.push_str("Recommendations:\n");
    for (index, recommendation) in result.overall_recommendations.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, recommendation));
    }
    output.push('\n');

    if detailed {
        output.push_str("Detailed Breakdown:\n");
        output.push_str(RULE);
        output.push('\n');

        output.push_str("## Hypothesis Feedback\n\n");
        for line in &hypothesis.feedback {
            output.push_str(&format!("  {line}\n"));
        }
        output.push('\n');

        output.push_str("## Suggested Rewrite\n\n");
        for line in hypothesis.improved_hypothesis.lines() {
            output.push_str(&format!("  {line}\n"));
        }
        output.push('\n');

        if !stats.warnings.is_empty() {
            output.push_str("## Statistical Warnings\n\n");
            for warning in &stats.warnings {
                output.push_str(&format!("  ⚠ {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("## Design\n\n");
        for warning in design.warnings() {
            output.push_str(&format!("  ⚠ {warning}\n"));
        }
        for recommendation in &design.recommendations {
            output.push_str(&format!("  • {recommendation}\n"));
        }
        output.push('\n');
    }

    output
}

/// Render an analysis to JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_analysis_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
