//! # Brain Module
//!
//! Rule-based conversational core for Verbot. Nothing here talks to a
//! network or a model: replies come from keyword rules and static tables.
//!
//! ## Components
//! - `knowledge`: token table and sentiment phrase pools
//! - `sentiment`: the market signal behind the analysis reply
//! - `intent`: ordered keyword rules, first match wins
//! - `generators`: one reply builder per category, plus the dispatching engine

pub mod generators;
pub mod intent;
pub mod knowledge;
pub mod sentiment;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use generators::{AIResponse, ResponseEngine};
#[allow(unused_imports)]
pub use intent::{Category, IntentClassifier, IntentRule};
#[allow(unused_imports)]
pub use knowledge::{KnowledgeBase, TokenCategory, TokenInfo};
#[allow(unused_imports)]
pub use sentiment::{FixedSignal, MarketSignal, RandomSignal, Sentiment};
