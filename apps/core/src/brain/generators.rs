//! Response generators, one per category, and the engine that dispatches to them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::intent::{Category, IntentClassifier};
use super::knowledge::{sample_phrase, KnowledgeBase};
use super::sentiment::{MarketSignal, RandomSignal, Sentiment};

pub const TRADE_CONFIDENCE: f32 = 0.9;
pub const TRADE_UNKNOWN_TOKEN_CONFIDENCE: f32 = 0.7;
pub const ANALYSIS_CONFIDENCE: f32 = 0.85;
pub const THERAPY_CONFIDENCE: f32 = 0.9;
pub const SYSTEM_CONFIDENCE: f32 = 0.8;

pub const UNKNOWN_TOKEN_PROMPT: &str =
    "Which token would you like to trade? I can help you analyze market conditions and execute trades.";
pub const THERAPY_RESPONSE: &str = "I understand trading can be stressful. Let's analyze your concerns and develop a balanced strategy. What specific aspects are worrying you?";
pub const SYSTEM_RESPONSE: &str = "I'm here to help with crypto trading. Would you like to check prices, execute trades, or get market analysis?";

/// A generated reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIResponse {
    pub content: String,
    pub category: Category,
    /// Fixed per branch, always within [0, 1]
    pub confidence: f32,
}

impl AIResponse {
    pub fn new(content: impl Into<String>, category: Category, confidence: f32) -> Self {
        Self {
            content: content.into(),
            category,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Trade branch. `normalized` must already be lowercased.
pub fn generate_trade(knowledge: &KnowledgeBase, normalized: &str) -> AIResponse {
    match knowledge.find_mentioned(normalized) {
        Some(token) => {
            let verb = if normalized.contains("buy") { "buy" } else { "sell" };
            AIResponse::new(
                format!(
                    "I can help you trade {}. What amount would you like to {}? I'll analyze the market conditions first.",
                    token.name, verb
                ),
                Category::Trade,
                TRADE_CONFIDENCE,
            )
        }
        None => AIResponse::new(
            UNKNOWN_TOKEN_PROMPT,
            Category::Trade,
            TRADE_UNKNOWN_TOKEN_CONFIDENCE,
        ),
    }
}

/// Analysis branch. No price data is consulted, only the signal reading.
pub fn generate_analysis<S, R>(signal: &mut S, rng: &mut R) -> AIResponse
where
    S: MarketSignal + ?Sized,
    R: Rng + ?Sized,
{
    let sentiment = Sentiment::from_reading(signal.reading());
    AIResponse::new(
        sample_phrase(sentiment, rng),
        Category::Analysis,
        ANALYSIS_CONFIDENCE,
    )
}

pub fn generate_therapy() -> AIResponse {
    AIResponse::new(THERAPY_RESPONSE, Category::Therapy, THERAPY_CONFIDENCE)
}

pub fn generate_system() -> AIResponse {
    AIResponse::new(SYSTEM_RESPONSE, Category::System, SYSTEM_CONFIDENCE)
}

/// Classifies an input and runs the matching generator
pub struct ResponseEngine {
    classifier: IntentClassifier,
    knowledge: KnowledgeBase,
    signal: Box<dyn MarketSignal>,
    rng: StdRng,
}

impl ResponseEngine {
    pub fn new(
        classifier: IntentClassifier,
        knowledge: KnowledgeBase,
        signal: Box<dyn MarketSignal>,
        rng: StdRng,
    ) -> Self {
        Self {
            classifier,
            knowledge,
            signal,
            rng,
        }
    }

    /// Engine with the default rules and a random signal, optionally seeded.
    pub fn with_seed(knowledge: KnowledgeBase, seed: Option<u64>) -> Self {
        let rng = match seed {
            // Offset so the phrase pick does not mirror the signal stream.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Self::new(
            IntentClassifier::new(),
            knowledge,
            Box::new(RandomSignal::new(seed)),
            rng,
        )
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn respond(&mut self, input: &str) -> AIResponse {
        match self.classifier.classify(input) {
            Category::Trade => generate_trade(&self.knowledge, &input.to_lowercase()),
            Category::Analysis => generate_analysis(self.signal.as_mut(), &mut self.rng),
            Category::Therapy => generate_therapy(),
            Category::System => generate_system(),
        }
    }
}
