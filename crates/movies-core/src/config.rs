//! Downstream endpoints and call tuning, read from the environment.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `MOVIES_INFO_URL` | yes | - |
//! | `MOVIES_REVIEWS_URL` | yes | - |
//! | `MOVIES_RETRY_DELAY_MS` | no | `1000` |
//! | `MOVIES_MAX_RETRIES` | no | `3` |
//! | `MOVIES_TIMEOUT_MS` | no | `3000` |

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::RetryPolicy;

pub const MOVIES_INFO_URL_VAR: &str = "MOVIES_INFO_URL";
pub const REVIEWS_URL_VAR: &str = "MOVIES_REVIEWS_URL";
pub const RETRY_DELAY_MS_VAR: &str = "MOVIES_RETRY_DELAY_MS";
pub const MAX_RETRIES_VAR: &str = "MOVIES_MAX_RETRIES";
pub const TIMEOUT_MS_VAR: &str = "MOVIES_TIMEOUT_MS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("{name} must be an http(s) URL: '{value}'")]
    InvalidUrl { name: &'static str, value: String },
    #[error("{name} must be a non-negative integer: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Base URLs of both downstream services plus retry/timeout overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct RestClientConfig {
    pub movies_info_url: String,
    pub reviews_url: String,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl RestClientConfig {
    pub fn new(
        movies_info_url: impl Into<String>,
        reviews_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            movies_info_url: validate_url(MOVIES_INFO_URL_VAR, movies_info_url.into())?,
            reviews_url: validate_url(REVIEWS_URL_VAR, reviews_url.into())?,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing { name })
        };

        let mut config = Self::new(required(MOVIES_INFO_URL_VAR)?, required(REVIEWS_URL_VAR)?)?;

        if let Some(delay_ms) = parse_optional(&lookup, RETRY_DELAY_MS_VAR)? {
            let delay = Duration::from_millis(delay_ms);
            config.retry = RetryPolicy::fixed(delay, config.retry.max_retries);
        }
        if let Some(max_retries) = parse_optional(&lookup, MAX_RETRIES_VAR)? {
            config.retry.max_retries = u32::try_from(max_retries).map_err(|_| {
                ConfigError::InvalidNumber {
                    name: MAX_RETRIES_VAR,
                    value: max_retries.to_string(),
                }
            })?;
        }
        if let Some(timeout_ms) = parse_optional(&lookup, TIMEOUT_MS_VAR)? {
            config.timeout_ms = timeout_ms;
        }

        Ok(config)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

fn validate_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidUrl { name, value })
    }
}

fn parse_optional(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { name, value: raw })
}
