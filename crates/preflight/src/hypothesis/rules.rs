//! Scoring rules and lexicons
//!
//! Every rule is a pure function of the normalized text. A dimension score
//! is the sum of its rules' contributions, clamped by the scorer.

use super::Dimension;
use crate::text::MatchText;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Contribution first matched term of a lexicon adds
pub const FIRST_MATCH: f64 = 2.0;
/// Contribution of each further distinct term
pub const ADDITIONAL_MATCH: f64 = 0.5;

/// Concrete UI elements and named page parts
pub const UI_ELEMENTS: &[&str] = &[
    "button",
    "form",
    "header",
    "footer",
    "navigation",
    "menu",
    "link",
    "image",
    "headline",
    "title",
    "subtitle",
    "banner",
    "page",
    "color",
    "layout",
    "copy",
    "call-to-action",
    "cta",
    "checkout",
    "cart",
    "product",
    "pricing",
    "signup",
    "login",
    "modal",
    "popup",
];

/// Things a user does that a change could influence
pub const USER_ACTIONS: &[&str] = &[
    "click",
    "submit",
    "purchase",
    "sign up",
    "register",
    "download",
    "subscribe",
    "complete",
    "finish",
    "proceed",
    "add to cart",
];

/// Words that describe a measurable quantity or change in one
pub const QUANTITATIVE_TERMS: &[&str] = &[
    "rate",
    "percentage",
    "%",
    "percent",
    "ratio",
    "count",
    "number",
    "total",
    "average",
    "median",
    "increase",
    "decrease",
];

/// Named metrics and measurement vocabulary
pub const METRIC_TERMS: &[&str] = &[
    "conversion",
    "click-through",
    "ctr",
    "engagement",
    "retention",
    "churn",
    "revenue",
    "bounce",
    "signups",
    "registrations",
    "average order value",
    "time on page",
    "track",
    "measure",
    "analytics",
    "metric",
    "kpi",
    "funnel",
];

/// Cues predicting an upward change
pub const POSITIVE_CUES: &[&str] = &[
    "increase", "improve", "boost", "enhance", "raise", "lift", "grow", "higher", "more",
    "better", "faster", "easier",
];

/// Cues predicting a downward change
pub const NEGATIVE_CUES: &[&str] = &[
    "decrease", "reduce", "lower", "less", "fewer", "minimize", "drop", "cut",
];

/// Causal and reasoning connectors
pub const CAUSAL_CONNECTORS: &[&str] = &[
    "because",
    "since",
    "due to",
    "as a result",
    "therefore",
    "given that",
    "considering",
    "based on",
    "according to",
    "leading to",
    "so that",
];

/// References to supporting evidence
pub const EVIDENCE_TERMS: &[&str] = &[
    "data",
    "research",
    "study",
    "analysis",
    "finding",
    "evidence",
    "insight",
    "observation",
    "feedback",
    "survey",
    "heatmap",
    "user behavior",
    "interview",
];

/// Words that sound like a prediction but name nothing measurable
pub const VAGUE_WORDS: &[&str] = &[
    "improve", "better", "optimize", "enhance", "good", "bad", "nice", "great", "awesome",
    "terrible", "amazing", "wonderful",
];

/// Score contribution and feedback of one rule
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleOutcome {
    /// Points added to the dimension before clamping
    pub contribution: f64,
    /// Annotated feedback line, if the rule has something to say
    pub feedback: Option<String>,
}

impl RuleOutcome {
    /// Rule did not fire
    #[must_use]
    pub const fn none() -> Self {
        Self {
            contribution: 0.0,
            feedback: None,
        }
    }

    /// Rule fired and scored
    #[must_use]
    pub fn scored(contribution: f64, feedback: impl Into<String>) -> Self {
        Self {
            contribution,
            feedback: Some(feedback.into()),
        }
    }

    /// Rule fired without changing the score
    #[must_use]
    pub fn note(feedback: impl Into<String>) -> Self {
        Self {
            contribution: 0.0,
            feedback: Some(feedback.into()),
        }
    }
}

/// A single pattern check feeding one dimension
pub trait ScoringRule: fmt::Debug + Send + Sync {
    /// Evaluate the rule against normalized text
    fn evaluate(&self, text: &MatchText) -> RuleOutcome;
}

/// `first` for one distinct match, plus `additional` for each further one
fn scaled(count: usize, first: f64, additional: f64) -> f64 {
    match count {
        0 => 0.0,
        n => first + additional * (n - 1) as f64,
    }
}

/// Counts distinct lexicon terms present in the text
#[derive(Debug, Clone)]
pub struct LexiconRule {
    label: &'static str,
    terms: &'static [&'static str],
    first: f64,
    additional: f64,
}

impl LexiconRule {
    /// Rule with the standard 2.0 / +0.5 scaling
    #[must_use]
    pub const fn new(label: &'static str, terms: &'static [&'static str]) -> Self {
        Self {
            label,
            terms,
            first: FIRST_MATCH,
            additional: ADDITIONAL_MATCH,
        }
    }

    /// Override the scaling
    #[must_use]
    pub const fn with_weights(mut self, first: f64, additional: f64) -> Self {
        self.first = first;
        self.additional = additional;
        self
    }
}

impl ScoringRule for LexiconRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let matched = text.matched_terms(self.terms);
        if matched.is_empty() {
            return RuleOutcome::none();
        }
        RuleOutcome::scored(
            scaled(matched.len(), self.first, self.additional),
            format!("✓ {} ({})", self.label, matched.join(", ")),
        )
    }
}

/// Quoted copy or names, e.g. `"Start free trial"`
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedEntityRule;

impl ScoringRule for QuotedEntityRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let quoted = text.quoted();
        if quoted.is_empty() {
            return RuleOutcome::none();
        }
        let names: Vec<String> = quoted.iter().map(|q| format!("\"{q}\"")).collect();
        RuleOutcome::scored(
            scaled(quoted.len(), FIRST_MATCH, ADDITIONAL_MATCH),
            format!("✓ Names specific content ({})", names.join(", ")),
        )
    }
}

/// Numeric and percentage literals
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericLiteralRule;

impl ScoringRule for NumericLiteralRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let mut literals: Vec<&str> = Vec::new();
        for literal in text.numeric_literals() {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        if literals.is_empty() {
            return RuleOutcome::none();
        }
        RuleOutcome::scored(
            scaled(literals.len(), FIRST_MATCH, ADDITIONAL_MATCH),
            format!("✓ States concrete numbers ({})", literals.join(", ")),
        )
    }
}

/// Any directional cue; extra cues do not add to the score
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalCueRule;

impl ScoringRule for DirectionalCueRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let up = text.matched_terms(POSITIVE_CUES);
        let down = text.matched_terms(NEGATIVE_CUES);
        let feedback = match (up.is_empty(), down.is_empty()) {
            (true, true) => return RuleOutcome::none(),
            (false, true) => format!("✓ Predicts a positive outcome ({})", up.join(", ")),
            (true, false) => format!("✓ Predicts a negative outcome ({})", down.join(", ")),
            (false, false) => {
                let all: Vec<&str> = up.into_iter().chain(down).collect();
                format!("✓ States a direction ({})", all.join(", "))
            }
        };
        RuleOutcome::scored(FIRST_MATCH, feedback)
    }
}

static MAGNITUDE_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn magnitude_regex() -> &'static Regex {
    MAGNITUDE_REGEX.get_or_init(|| {
        Regex::new(r"\bby (\d+(?:\.\d+)?) (%|percent\b|pp\b|percentage points?\b)")
            .expect("magnitude pattern is valid")
    })
}

/// Expected size of the change, e.g. `by 10%`
#[derive(Debug, Clone, Copy, Default)]
pub struct MagnitudeRule;

impl ScoringRule for MagnitudeRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let joined = text.joined();
        let Some(caps) = magnitude_regex().captures(&joined) else {
            return RuleOutcome::none();
        };
        let amount = caps.get(1).map_or("", |m| m.as_str());
        let unit = match caps.get(2).map_or("", |m| m.as_str()) {
            "%" => "%".to_string(),
            other => format!(" {other}"),
        };
        RuleOutcome::scored(
            ADDITIONAL_MATCH,
            format!("✓ Quantifies the expected change (by {amount}{unit})"),
        )
    }
}

/// Flags hypotheses predicting both an increase and a decrease
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedDirectionRule;

impl ScoringRule for MixedDirectionRule {
    fn evaluate(&self, text: &MatchText) -> RuleOutcome {
        let up = text.matched_terms(POSITIVE_CUES);
        let down = text.matched_terms(NEGATIVE_CUES);
        if up.is_empty() || down.is_empty() {
            return RuleOutcome::none();
        }
        RuleOutcome::note(format!(
            "⚠ Mixed directional predictions ({} vs {}); state the one expected direction",
            up.join(", "),
            down.join(", ")
        ))
    }
}

/// Ordered rules for a dimension
#[must_use]
pub fn default_rules(dimension: Dimension) -> Vec<Box<dyn ScoringRule>> {
    match dimension {
        Dimension::Specificity => vec![
            Box::new(LexiconRule::new("Identifies specific UI elements", UI_ELEMENTS)),
            Box::new(LexiconRule::new("Identifies specific user actions", USER_ACTIONS)),
            Box::new(QuotedEntityRule),
        ],
        Dimension::Measurability => vec![
            Box::new(LexiconRule::new("Uses quantitative terms", QUANTITATIVE_TERMS)),
            Box::new(NumericLiteralRule),
            Box::new(LexiconRule::new("Names a metric", METRIC_TERMS)),
        ],
        Dimension::Directionality => vec![
            Box::new(DirectionalCueRule),
            Box::new(MagnitudeRule),
            Box::new(MixedDirectionRule),
        ],
        Dimension::Rationale => vec![
            Box::new(LexiconRule::new("Contains reasoning", CAUSAL_CONNECTORS)),
            Box::new(
                LexiconRule::new("References supporting evidence", EVIDENCE_TERMS)
                    .with_weights(ADDITIONAL_MATCH, 0.0),
            ),
        ],
    }
}
