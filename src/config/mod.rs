//! Runtime settings resolved from CLI flags and the environment.
//!
//! Nothing is persisted: the API key comes from `--api-key` or
//! [`API_KEY_ENV`] every run.

use std::fmt;
use std::time::Duration;

use crate::consts::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL,
};
use crate::error::ConfigError;
use crate::resilience::RetryPolicy;

/// Raw, optional inputs as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_attempts: Option<u32>,
    pub initial_delay_ms: Option<u64>,
}

/// Everything needed to talk to the endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub policy: RetryPolicy,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Settings {
    /// Resolve against the process environment.
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    /// Priority for the key: flag → environment variable.
    pub fn resolve_with(
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env(API_KEY_ENV).filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let base_url = overrides
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let policy = RetryPolicy::new(
            overrides.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            overrides
                .initial_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_INITIAL_DELAY),
        )?;

        Ok(Self {
            api_key,
            model: overrides.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            policy,
        })
    }
}
