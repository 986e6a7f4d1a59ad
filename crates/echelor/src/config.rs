//! Configuration
//!
//! Explicit configuration objects, built from defaults or the environment
//! and handed to constructors. Nothing here is global.

use std::time::Duration;

use agent_core::provider::{GenerationOptions, DEFAULT_MODEL};

use crate::alerts::AlertThresholds;

/// Assistant gateway settings
#[derive(Clone, Debug, PartialEq)]
pub struct AssistantConfig {
    /// Chat model identifier
    pub model: String,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,

    /// Upper bound on a single provider call
    pub request_timeout: Duration,

    /// Concurrent outbound calls allowed across all users
    pub max_concurrent_requests: usize,

    /// Extra attempts after a transport failure. 0 disables retry.
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further attempt
    pub retry_backoff: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: None,
            request_timeout: Duration::from_secs(30),
            max_concurrent_requests: 4,
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl AssistantConfig {
    /// Read `ECHELOR_MODEL`, `ECHELOR_REQUEST_TIMEOUT_SECS`,
    /// `ECHELOR_MAX_CONCURRENT` and `ECHELOR_MAX_RETRIES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model: std::env::var("ECHELOR_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.model),
            request_timeout: env_parse("ECHELOR_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_concurrent_requests: env_parse("ECHELOR_MAX_CONCURRENT")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_concurrent_requests),
            max_retries: env_parse("ECHELOR_MAX_RETRIES").unwrap_or(defaults.max_retries),
            ..defaults
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: None,
        }
    }
}

/// Everything the dashboard host needs
#[derive(Clone, Debug, Default)]
pub struct EchelorConfig {
    pub thresholds: AlertThresholds,
    pub assistant: AssistantConfig,
}

impl EchelorConfig {
    pub fn from_env() -> Self {
        Self {
            thresholds: AlertThresholds::from_env(),
            assistant: AssistantConfig::from_env(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_generation_options_follow_config() {
        let options = AssistantConfig::default().with_model("gpt-4o-mini").generation_options();
        assert_eq!(options.model, "gpt-4o-mini");
        assert_eq!(options.temperature, None);
    }
}
