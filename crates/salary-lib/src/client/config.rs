//! Client configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the prediction service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the prediction service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `SALARY_*` environment variables
    pub fn load() -> Result<Self> {
        Self::from_env(config::Environment::with_prefix("SALARY"))
    }

    /// Build from an environment source; unset keys take their defaults and
    /// an unparseable value is an error
    pub fn from_env(env: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read SALARY_* settings")?
            .try_deserialize()
            .context("Invalid SALARY_* settings")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::new("http://svc:5000")
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("SALARY").source(Some(map))
    }

    #[test]
    fn test_env_settings_are_read() {
        let config = ClientConfig::from_env(env(&[
            ("SALARY_API_URL", "http://svc.internal:8000"),
            ("SALARY_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://svc.internal:8000");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_empty_env_yields_defaults() {
        assert_eq!(ClientConfig::from_env(env(&[])).unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let err = ClientConfig::from_env(env(&[
            ("SALARY_API_URL", "http://svc.internal:8000"),
            ("SALARY_REQUEST_TIMEOUT_SECS", "abc"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid SALARY_* settings"));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_url": "http://svc:8000"}"#).unwrap();
        assert_eq!(config.api_url, "http://svc:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
