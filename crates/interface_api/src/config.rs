//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::{CoreError, Timezone};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// IANA timezone used to decide what "today" is for incident dates
    pub timezone: String,
    /// Artificial delay of the in-memory submission adapter
    pub submission_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            timezone: "UTC".to_string(),
            submission_latency_ms: 0,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the configured timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        self.timezone.parse::<Timezone>().map_err(CoreError::from)
    }

    /// Latency to apply to submissions, if any
    pub fn submission_latency(&self) -> Option<Duration> {
        (self.submission_latency_ms > 0).then(|| Duration::from_millis(self.submission_latency_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.submission_latency(), None);
        assert!(config.timezone().is_ok());
    }

    #[test]
    fn test_unknown_timezone_is_a_configuration_error() {
        let config = ApiConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.timezone().is_err());
    }

    #[test]
    fn test_latency() {
        let config = ApiConfig {
            submission_latency_ms: 1500,
            ..ApiConfig::default()
        };
        assert_eq!(config.submission_latency(), Some(Duration::from_millis(1500)));
    }
}
