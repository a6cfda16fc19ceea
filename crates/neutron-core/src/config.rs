//! Configuration structures for Neutron clients.
//!
//! Deployments typically load this from a config file or environment and hand
//! it to the extension client builders.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a Neutron client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NeutronClientConfig {
    /// Neutron endpoint base URL (e.g. "https://neutron.example.com:9696/v2.0")
    #[validate(url)]
    pub endpoint_url: String,

    /// Pre-obtained auth token to send as X-Auth-Token.
    ///
    /// Token acquisition (Keystone or otherwise) is out of scope here.
    #[serde(skip_serializing, default)]
    pub auth_token: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    crate::client::FWAAS_DEFAULT_TIMEOUT
}

impl NeutronClientConfig {
    /// Create a new client configuration for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            endpoint_url: endpoint_url.into(),
            auth_token: None,
            tls_verify: default_tls_verify(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the auth token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_endpoint_url(&self) -> Result<Url, Error> {
        Url::parse(&self.endpoint_url)
            .map_err(|e| Error::ConfigError(format!("Invalid endpoint URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = NeutronClientConfig::new("https://neutron.example.com:9696/v2.0").unwrap();
        assert_eq!(config.endpoint_url, "https://neutron.example.com:9696/v2.0");
        assert!(config.auth_token.is_none());
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 20);
    }

    #[test]
    fn test_config_invalid_url() {
        let result = NeutronClientConfig::new("not-a-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = NeutronClientConfig::new("https://neutron.example.com:9696/v2.0")
            .unwrap()
            .with_auth_token("tok-1")
            .with_tls_verify(false)
            .with_timeout(60);

        assert_eq!(config.auth_token, Some("tok-1".to_string()));
        assert!(!config.tls_verify);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_parse_endpoint_url() {
        let config = NeutronClientConfig::new("https://neutron.example.com:9696/v2.0").unwrap();
        let url = config.parse_endpoint_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("neutron.example.com"));
        assert_eq!(url.port(), Some(9696));
    }

    #[test]
    fn test_config_token_not_serialized() {
        let config = NeutronClientConfig::new("https://neutron.example.com:9696/v2.0")
            .unwrap()
            .with_auth_token("tok-1");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("tok-1"));
        assert!(json.contains("neutron.example.com"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = NeutronClientConfig::new("https://neutron.example.com:9696/v2.0").unwrap();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        assert!(config.validate().is_ok());
    }
}
