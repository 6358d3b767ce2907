//! Intent Classification using ordered trigger rules.
//!
//! Each rule is a regex alternation of literal trigger words. Rules are
//! evaluated top to bottom against the lowercased input and the first match
//! wins. An input that matches nothing falls through to `Category::System`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Coarse category assigned to a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Buy/sell requests
    Trade,
    /// Market analysis or price questions
    Analysis,
    /// Emotional support
    Therapy,
    /// Catch-all
    System,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Trade => "trade",
            Category::Analysis => "analysis",
            Category::Therapy => "therapy",
            Category::System => "system",
        }
    }
}

/// A single (pattern, category) rule
#[derive(Debug, Clone)]
pub struct IntentRule {
    category: Category,
    pattern: Regex,
}

impl IntentRule {
    /// Builds a rule matching any of `triggers` as a plain substring.
    pub fn new(category: Category, triggers: &[&str]) -> Result<Self, regex::Error> {
        let alternation = triggers
            .iter()
            .map(|t| regex::escape(&t.to_lowercase()))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            category,
            pattern: Regex::new(&alternation)?,
        })
    }

    #[allow(dead_code)]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the trigger that matched, if any.
    pub fn find<'t>(&self, normalized: &'t str) -> Option<&'t str> {
        self.pattern.find(normalized).map(|m| m.as_str())
    }
}

// NOTE: expect() is acceptable here, the triggers are escaped literals.
static DEFAULT_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::new(Category::Trade, &["buy", "sell"]).expect("Invalid trade triggers"),
        IntentRule::new(Category::Analysis, &["analysis", "price"])
            .expect("Invalid analysis triggers"),
        IntentRule::new(Category::Therapy, &["worried", "scared"])
            .expect("Invalid therapy triggers"),
    ]
});

/// Intent classifier using an ordered rule list
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the trade > analysis > therapy rules
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }

    /// Create a classifier with a custom rule order
    #[allow(dead_code)]
    pub fn with_rules(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Classify a text. Total: anything unmatched is `Category::System`.
    pub fn classify(&self, text: &str) -> Category {
        let normalized = text.to_lowercase();
        for rule in &self.rules {
            if let Some(trigger) = rule.find(&normalized) {
                debug!(category = %rule.category, trigger, "intent matched");
                return rule.category;
            }
        }
        Category::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_detection() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("Buy SOL now"), Category::Trade);
        assert_eq!(classifier.classify("I want to SELL"), Category::Trade);
        assert_eq!(classifier.classify("bought yesterday? buying more"), Category::Trade);
    }

    #[test]
    fn test_analysis_detection() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("Give me an analysis"), Category::Analysis);
        assert_eq!(classifier.classify("What's the PRICE of bonk?"), Category::Analysis);
    }

    #[test]
    fn test_therapy_detection() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("I'm scared about my position"), Category::Therapy);
        assert_eq!(classifier.classify("so Worried"), Category::Therapy);
    }

    #[test]
    fn test_default_is_system() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("hello"), Category::System);
        assert_eq!(classifier.classify(""), Category::System);
        assert_eq!(classifier.classify("   "), Category::System);
    }

    #[test]
    fn test_first_rule_wins() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("I'm scared, should I sell?"), Category::Trade);
        assert_eq!(classifier.classify("price analysis, I'm worried"), Category::Analysis);
    }

    #[test]
    fn test_custom_rules_order() {
        let classifier = IntentClassifier::with_rules(vec![
            IntentRule::new(Category::Therapy, &["scared"]).unwrap(),
            IntentRule::new(Category::Trade, &["sell"]).unwrap(),
        ]);

        assert_eq!(classifier.classify("I'm scared, should I sell?"), Category::Therapy);
    }

    #[test]
    fn test_triggers_are_literal() {
        let rule = IntentRule::new(Category::System, &["a.b"]).unwrap();
        assert!(rule.find("axb").is_none());
        assert_eq!(rule.find("see a.b here"), Some("a.b"));
    }
}
