use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

pub const ENV_TYPING_DELAY_MS: &str = "VERBOT_TYPING_DELAY_MS";
pub const ENV_REPLY_TIMEOUT_SECS: &str = "VERBOT_REPLY_TIMEOUT_SECS";
pub const ENV_REQUIRE_WALLET: &str = "VERBOT_REQUIRE_WALLET";
pub const ENV_TOKENS_FILE: &str = "VERBOT_TOKENS_FILE";
pub const ENV_LOG_FORMAT: &str = "VERBOT_LOG_FORMAT";
pub const ENV_SEED: &str = "VERBOT_SEED";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Simulated typing latency before each reply.
    #[validate(range(max = 10000))]
    pub typing_delay_ms: u64,
    /// Extra time a caller waits for its turn to finish.
    #[validate(range(min = 1, max = 300))]
    pub reply_timeout_secs: u64,
    /// Gate every turn behind the "connect your wallet" notice.
    pub require_wallet: bool,
    /// Optional JSON file with extra tokens for the knowledge base.
    pub tokens_file: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Seeds the sentiment draw for reproducible sessions.
    pub sentiment_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1000,
            reply_timeout_secs: 30,
            require_wallet: false,
            tokens_file: None,
            log_format: LogFormat::Pretty,
            sentiment_seed: None,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the configuration from the environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads the configuration from the process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            typing_delay_ms: parse_var(ENV_TYPING_DELAY_MS)?.unwrap_or(defaults.typing_delay_ms),
            reply_timeout_secs: parse_var(ENV_REPLY_TIMEOUT_SECS)?
                .unwrap_or(defaults.reply_timeout_secs),
            require_wallet: parse_bool_var(ENV_REQUIRE_WALLET)?.unwrap_or(defaults.require_wallet),
            tokens_file: read_var(ENV_TOKENS_FILE).map(PathBuf::from),
            log_format: match read_var(ENV_LOG_FORMAT) {
                Some(raw) => raw.parse()?,
                None => defaults.log_format,
            },
            sentiment_seed: parse_var(ENV_SEED)?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Returns the variable's value, treating unset and blank the same.
fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    read_var(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("Invalid {}='{}': {}", name, raw, e)))
        })
        .transpose()
}

fn parse_bool_var(name: &str) -> Result<Option<bool>, AppError> {
    read_var(name)
        .map(|raw| match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!(
                "Invalid {}='{}': expected a boolean",
                name, raw
            ))),
        })
        .transpose()
}
