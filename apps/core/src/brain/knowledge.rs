//! Knowledge Base - static token metadata and sentiment phrase pools.
//!
//! Tokens are keyed by uppercase symbol and kept in insertion order so that
//! a scan over the table is deterministic.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

use super::sentiment::Sentiment;
use crate::error::AppError;

/// Market category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Memecoin,
    Defi,
    Layer1,
    Gaming,
    Ai,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenCategory::Memecoin => "memecoin",
            TokenCategory::Defi => "defi",
            TokenCategory::Layer1 => "layer1",
            TokenCategory::Gaming => "gaming",
            TokenCategory::Ai => "ai",
        };
        write!(f, "{}", label)
    }
}

/// Descriptive metadata for a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TokenInfo {
    /// Full display name (e.g. "Solana")
    #[validate(length(min = 1))]
    pub name: String,
    /// Ticker symbol, stored uppercase
    #[validate(length(min = 1))]
    pub symbol: String,
    pub category: TokenCategory,
    pub description: String,
}

impl TokenInfo {
    fn builtin(name: &str, symbol: &str, category: TokenCategory, description: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            category,
            description: description.to_string(),
        }
    }
}

const BULLISH_PHRASES: &[&str] = &[
    "Market momentum is strong",
    "Buy pressure increasing",
    "Technical indicators suggest upward movement",
];

const BEARISH_PHRASES: &[&str] = &[
    "Market showing weakness",
    "Selling pressure detected",
    "Consider waiting for better entry",
];

const NEUTRAL_PHRASES: &[&str] = &[
    "Market in consolidation",
    "Sideways trading pattern",
    "Monitor for breakout signals",
];

/// Returns the fixed phrase pool for a sentiment. Every pool is non-empty.
pub fn phrase_pool(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Bullish => BULLISH_PHRASES,
        Sentiment::Bearish => BEARISH_PHRASES,
        Sentiment::Neutral => NEUTRAL_PHRASES,
    }
}

/// Picks one phrase uniformly at random from the named pool.
pub fn sample_phrase<R: Rng + ?Sized>(sentiment: Sentiment, rng: &mut R) -> &'static str {
    let pool = phrase_pool(sentiment);
    debug_assert!(!pool.is_empty(), "sentiment pools are non-empty");
    pool.choose(rng).copied().unwrap_or_default()
}

/// Static token table
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    tokens: Vec<TokenInfo>,
    index: HashMap<String, usize>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Creates the knowledge base with the built-in tokens
    pub fn new() -> Self {
        let mut kb = Self {
            tokens: Vec::new(),
            index: HashMap::new(),
        };
        kb.insert(TokenInfo::builtin(
            "Solana",
            "SOL",
            TokenCategory::Layer1,
            "High-performance L1 blockchain",
        ));
        kb.insert(TokenInfo::builtin(
            "Bonk",
            "BONK",
            TokenCategory::Memecoin,
            "Solana ecosystem memecoin",
        ));
        kb
    }

    /// Inserts a token, replacing any entry with the same symbol in place.
    pub fn insert(&mut self, mut token: TokenInfo) {
        token.symbol = token.symbol.trim().to_uppercase();
        match self.index.get(&token.symbol) {
            Some(&pos) => self.tokens[pos] = token,
            None => {
                self.index.insert(token.symbol.clone(), self.tokens.len());
                self.tokens.push(token);
            }
        }
    }

    /// Merges tokens from a JSON file containing an array of `TokenInfo`.
    ///
    /// Returns the number of tokens read from the file.
    pub fn load_extra_tokens(&mut self, path: &Path) -> Result<usize, AppError> {
        let raw = fs::read_to_string(path)?;
        let tokens: Vec<TokenInfo> = serde_json::from_str(&raw)?;

        for token in &tokens {
            token.validate()?;
            if token.symbol.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Token '{}' has a blank symbol",
                    token.name
                )));
            }
        }

        let count = tokens.len();
        for token in tokens {
            debug!("Loading token {} ({})", token.symbol, token.name);
            self.insert(token);
        }
        info!("Loaded {} extra tokens from {:?}", count, path);
        Ok(count)
    }

    /// Looks up a token by symbol, ignoring case.
    pub fn lookup_token(&self, symbol: &str) -> Option<&TokenInfo> {
        self.index
            .get(&symbol.trim().to_uppercase())
            .map(|&pos| &self.tokens[pos])
    }

    /// Returns the first token, in table order, whose symbol appears in the
    /// given lowercase text.
    pub fn find_mentioned(&self, normalized: &str) -> Option<&TokenInfo> {
        self.tokens
            .iter()
            .find(|token| normalized.contains(&token.symbol.to_lowercase()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenInfo> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
