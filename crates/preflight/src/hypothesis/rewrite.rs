//! Improved-hypothesis suggestions

use super::rules::VAGUE_WORDS;
use super::Dimension;
use crate::config::HypothesisConfig;
use crate::text::MatchText;

/// Structural template every suggestion ends with
pub const TEMPLATE: &str = "Changing [X] will [cause Y] because [rationale].";

/// Message for hypotheses that need no rewrite
pub const WELL_STRUCTURED: &str = "Hypothesis is already well-structured. No changes needed.";

/// Vague words present in the text, in lexicon order
#[must_use]
pub fn vague_words(text: &MatchText) -> Vec<&'static str> {
    text.matched_terms(VAGUE_WORDS)
}

/// Concrete fix for a weak dimension
#[must_use]
pub const fn fix_for(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Specificity => {
            "Name the exact element you are changing (e.g., 'checkout button', 'signup form headline')"
        }
        Dimension::Measurability => {
            "Name the metric and the size of the change (e.g., 'conversion rate by 5%')"
        }
        Dimension::Directionality => "State whether you expect the metric to increase or decrease",
        Dimension::Rationale => {
            "Explain why with 'because' and cite supporting evidence (e.g., user research, analytics)"
        }
    }
}

/// Build the suggestion from per-dimension scores
///
/// `scores` is indexed in [`Dimension::ALL`] order.
#[must_use]
pub fn suggest(
    config: &HypothesisConfig,
    text: &MatchText,
    scores: &[f64; 4],
    weakest: Dimension,
) -> String {
    if text.is_blank() {
        return format!(
            "No hypothesis provided. Start from scratch: name the change, the metric you expect \
             it to move and why.\nTemplate: {TEMPLATE}"
        );
    }

    let overall: f64 = scores.iter().sum();
    if overall >= config.well_structured_score {
        return WELL_STRUCTURED.to_string();
    }

    let mut fixes: Vec<String> = Dimension::ALL
        .iter()
        .zip(scores)
        .filter(|(_, score)| **score < config.strong_dimension)
        .map(|(&dimension, _)| fix_for(dimension).to_string())
        .collect();
    if fixes.is_empty() {
        fixes.push(fix_for(weakest).to_string());
    }

    let vague = vague_words(text);
    if !vague.is_empty() {
        fixes.push(format!(
            "Replace vague words like '{}' with specific, measurable terms",
            vague.join(", ")
        ));
    }

    let mut out = format!(
        "Weakest dimension: {} ({:.1}/{:.1}).\nConsider these improvements:\n",
        weakest.label(),
        scores[weakest.index()],
        config.dimension_cap
    );
    for fix in &fixes {
        out.push_str("• ");
        out.push_str(fix);
        out.push('\n');
    }
    out.push_str("Template: ");
    out.push_str(TEMPLATE);
    out
}
