//! Configuration for the pixmark API client
//!
//! Values come from the TOML `[service]` section and can be overridden by
//! environment variables.

use crate::error::{ApiError, ApiResult};
use pixmark_core::config::ServiceConfig;
use std::env;
use std::time::Duration;

/// Default image service address (the backend listens on port 5000 by default)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the base URL
pub const ENV_API_URL: &str = "PIXMARK_API_URL";

/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "PIXMARK_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the image service, without the `/v1` prefix
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// `User-Agent` sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("pixmark-api-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Build from the `[service]` section of the config file
    #[must_use]
    pub fn from_schema(service: &ServiceConfig) -> Self {
        Self::default()
            .with_base_url(service.base_url.clone())
            .with_timeout(Duration::from_secs(service.timeout_secs))
    }

    /// Defaults with environment overrides applied
    ///
    /// Reads `PIXMARK_API_URL` and `PIXMARK_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of the current values
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production)
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse().ok()) {
            self.timeout = Duration::from_secs(secs);
        }

        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("pixmark-api-client/"));
    }

    #[test]
    fn test_from_schema() {
        let service = ServiceConfig {
            base_url: "https://images.example.com".to_string(),
            timeout_secs: 5,
        };
        let config = ClientConfig::from_schema(&service);
        assert_eq!(config.base_url, "https://images.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default().with_overrides_from(|key| match key {
            ENV_API_URL => Some("https://override.example.com".to_string()),
            ENV_TIMEOUT_SECS => Some("not-a-number".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "https://override.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_override_ignored() {
        let config = ClientConfig::default().with_overrides_from(|key| {
            (key == ENV_API_URL).then(|| "   ".to_string())
        });
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default()
            .with_base_url("ftp://images.example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
