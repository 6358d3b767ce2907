//! Market sentiment reading.
//!
//! The analysis generator never looks at price data. It takes a single
//! reading in [0, 1) from a `MarketSignal` and buckets it. Tests swap in a
//! `FixedSignal` to pin the bucket.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Readings above this are bullish.
pub const BULLISH_THRESHOLD: f64 = 0.6;
/// Readings below this are bearish.
pub const BEARISH_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    /// Buckets a reading. Both thresholds are exclusive, so 0.4 and 0.6 are neutral.
    pub fn from_reading(reading: f64) -> Self {
        if reading > BULLISH_THRESHOLD {
            Sentiment::Bullish
        } else if reading < BEARISH_THRESHOLD {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Source of the sentiment reading.
pub trait MarketSignal: Send + 'static {
    /// Returns a value in [0, 1).
    fn reading(&mut self) -> f64;
}

/// Uniform random readings.
pub struct RandomSignal {
    rng: StdRng,
}

impl RandomSignal {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl MarketSignal for RandomSignal {
    fn reading(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same reading.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct FixedSignal(pub f64);

impl MarketSignal for FixedSignal {
    fn reading(&mut self) -> f64 {
        self.0
    }
}
