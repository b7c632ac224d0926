//! Text normalization for lexicon matching
//!
//! Hypotheses are free text, so matching runs on a token stream rather than
//! raw substrings:
//! - lowercase, punctuation acts as a word boundary (`"button,"` -> `button`)
//! - hyphenated terms match their spaced form (`call-to-action`)
//! - `%` is its own token and decimals such as `2.5` stay whole
//! - the last word of a term also matches simple inflections
//!   (`click` matches `clicks`, `clicked`, `clicking`)
//!
//! Quoted spans are captured from the raw text before normalization.

use regex::Regex;
use std::sync::OnceLock;

static QUOTED_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn quoted_regex() -> &'static Regex {
    QUOTED_REGEX.get_or_init(|| {
        Regex::new(r#""([^"\n]{2,})"|“([^”\n]{2,})”|(?:^|\s)'([^'\n]{2,})'\B"#)
            .expect("quoted span pattern is valid")
    })
}

/// Split text into lowercase match tokens
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
            continue;
        }

        let decimal_point = ch == '.'
            && current.chars().last().is_some_and(|c| c.is_ascii_digit())
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if decimal_point {
            current.push('.');
            continue;
        }

        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        if ch == '%' {
            tokens.push("%".to_string());
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Whether `token` is `word` or a simple inflection of it
fn inflects(token: &str, word: &str) -> bool {
    if token == word {
        return true;
    }
    let Some(suffix) = token.strip_prefix(word) else {
        // "reducing" / "categories"
        if let Some(stem) = word.strip_suffix('e') {
            return token.strip_prefix(stem) == Some("ing");
        }
        if let Some(stem) = word.strip_suffix('y') {
            return token.strip_prefix(stem) == Some("ies");
        }
        return false;
    };
    matches!(suffix, "s" | "es" | "d" | "ed" | "ing")
}

/// Hypothesis text prepared for pattern matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchText {
    tokens: Vec<String>,
    quoted: Vec<String>,
}

impl MatchText {
    /// Normalize raw text
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let quoted = quoted_regex()
            .captures_iter(raw)
            .filter_map(|caps| caps.iter().skip(1).flatten().next())
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            tokens: tokenize(raw),
            quoted,
        }
    }

    /// No matchable content at all
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Normalized tokens
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens joined by single spaces, for regex rules
    #[must_use]
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Quoted spans such as `"Start free trial"`
    #[must_use]
    pub fn quoted(&self) -> &[String] {
        &self.quoted
    }

    /// Whether a (possibly multi-word) term occurs
    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        let words = tokenize(term);
        let Some((last, head)) = words.split_last() else {
            return false;
        };
        if self.tokens.len() < words.len() {
            return false;
        }

        self.tokens.windows(words.len()).any(|window| {
            window
                .split_last()
                .is_some_and(|(window_last, window_head)| {
                    window_head == head && inflects(window_last, last)
                })
        })
    }

    /// Terms of a lexicon that occur, in lexicon order
    #[must_use]
    pub fn matched_terms<'a>(&self, terms: &[&'a str]) -> Vec<&'a str> {
        terms
            .iter()
            .copied()
            .filter(|term| self.contains_term(term))
            .collect()
    }

    /// Numeric literals such as `10`, `2.5`
    #[must_use]
    pub fn numeric_literals(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .filter(|t| t.chars().all(|c| c.is_ascii_digit() || c == '.'))
            .collect()
    }
}
