//! Startup configuration
//!
//! Everything is read once from the process environment. `main` seeds the
//! environment from a local `.env` file first, when one exists.
//! Variables already set in the shell win over the file.

use crate::llm::DEFAULT_BASE_URL;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "CHATLOOP_MODEL";
pub const TEMPERATURE_VAR: &str = "CHATLOOP_TEMPERATURE";
pub const TIMEOUT_VAR: &str = "CHATLOOP_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} not found! Please set it in your .env file.")]
    MissingCredential { var: &'static str },
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Resolved settings for one chat session
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature; 0 asks the provider for deterministic output
    pub temperature: f32,
    pub request_timeout: Duration,
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = lookup(MODEL_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup(TEMPERATURE_VAR) {
            Some(raw) => parse_temperature(&raw)?,
            None => 0.0,
        };

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            request_timeout,
        })
    }
}

/// Seed the process environment from the nearest `.env` file.
///
/// Lines that fail to parse are skipped, not fatal, so a key declared after
/// a bad line still loads. Returns the errors for the skipped lines.
pub fn load_dotenv() -> Result<Vec<dotenvy::Error>, dotenvy::Error> {
    let entries = dotenvy::dotenv_iter()?;
    Ok(apply_dotenv(entries, |key, value| {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(key, value);
        }
    }))
}

/// Feed parsed `.env` entries to `set`, collecting the ones that failed.
pub fn apply_dotenv<I>(entries: I, mut set: impl FnMut(String, String)) -> Vec<dotenvy::Error>
where
    I: IntoIterator<Item = Result<(String, String), dotenvy::Error>>,
{
    let mut skipped = Vec::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => set(key, value),
            Err(e @ dotenvy::Error::LineParse(..)) => skipped.push(e),
            // A read error leaves nothing sensible to continue from
            Err(e) => {
                skipped.push(e);
                break;
            }
        }
    }
    skipped
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: TEMPERATURE_VAR,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let value: f32 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid("must be between 0 and 2"));
    }
    Ok(value)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: TIMEOUT_VAR,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("not a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
