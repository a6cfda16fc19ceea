//! HTTP client utilities shared by the extension client crates.
//!
//! Each extension crate (FWaaS, and whatever comes next) wraps a
//! [`ServiceClient`], which owns the base URL, the connection pool, and the
//! auth token header. Retry, backoff, and pagination policy are deliberately
//! the caller's business; a `ServiceClient` executes exactly one request per
//! call.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{Error, Result};

/// Default timeout for FWaaS requests (in seconds)
pub const FWAAS_DEFAULT_TIMEOUT: u64 = 20;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
///
/// Configures connection behavior shared by every extension client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,

    /// Verify TLS certificates
    pub tls_verify: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(FWAAS_DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
            tls_verify: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    ///
    /// Disabling is for lab endpoints with self-signed certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    service: String,
    base_url: Url,
    user_agent: Option<String>,
    token: Option<SecretString>,
    config: ClientConfig,
}

impl ServiceClientBuilder {
    /// Create a builder for the named service at the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn new(
        service: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let mut raw = base_url.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        Ok(Self {
            service: service.into(),
            base_url,
            user_agent: None,
            token: None,
            config: ClientConfig::new().with_timeout(timeout),
        })
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Configure an X-Auth-Token header sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Return the staged HTTP client configuration.
    #[must_use]
    pub fn http_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ServiceClient> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .pool_idle_timeout(self.config.pool_idle_timeout)
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if !self.config.enable_compression {
            builder = builder.no_gzip();
        }
        if !self.config.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        Ok(ServiceClient {
            service: self.service,
            base_url: self.base_url,
            http,
            token: self.token,
        })
    }
}

/// Shared HTTP client for one Neutron extension endpoint.
#[derive(Clone)]
pub struct ServiceClient {
    service: String,
    base_url: Url,
    http: reqwest::Client,
    token: Option<SecretString>,
}

impl ServiceClient {
    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the service name this client talks to.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Execute a single request against `path`, relative to the base URL.
    ///
    /// `customize` gets a chance to attach headers and a body; `map_status`
    /// converts a non-success status plus response text into an [`Error`].
    ///
    /// # Errors
    ///
    /// Returns the mapped error for non-success statuses, or a transport
    /// error if the request could not be sent.
    pub async fn execute<F, M>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        customize: F,
        map_status: M,
    ) -> Result<reqwest::Response>
    where
        F: FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
        M: FnOnce(StatusCode, String) -> Error,
    {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.header("X-Auth-Token", token.expose_secret());
        }
        let request = customize(request);

        tracing::debug!(service = %self.service, %method, %url, "sending request");
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(service = %self.service, %status, "request failed");
        Err(map_status(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new();
        assert_eq!(config.timeout, Duration::from_secs(FWAAS_DEFAULT_TIMEOUT));
        assert_eq!(
            config.pool_idle_timeout,
            Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT)
        );
        assert_eq!(config.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
        assert!(config.enable_compression);
        assert!(config.tls_verify);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20)
            .with_compression(false);

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
        assert!(!config.enable_compression);
    }

    #[test]
    fn test_tls_verify_disabled_still_builds() {
        let config = ClientConfig::new().with_tls_verify(false);
        assert!(!config.tls_verify);

        let client = ServiceClientBuilder::new(
            "fwaas",
            "https://neutron.example.com/v2.0",
            Duration::from_secs(5),
        )
        .unwrap()
        .with_http_config(config)
        .build()
        .unwrap();
        assert_eq!(client.service(), "fwaas");
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        let result = ServiceClientBuilder::new("fwaas", "not a url", Duration::from_secs(5));
        assert!(matches!(result.unwrap_err(), Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let builder =
            ServiceClientBuilder::new("fwaas", "http://neutron.example.com/v2.0", Duration::from_secs(5))
                .unwrap();
        let client = builder.build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://neutron.example.com/v2.0/");
    }

    #[tokio::test]
    async fn test_execute_sends_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fw/firewalls"))
            .and(header("X-Auth-Token", "secret-token"))
            .and(query_param("tenant_id", "t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new("fwaas", server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_token("secret-token")
            .build()
            .unwrap();

        let response = client
            .execute(
                Method::GET,
                "fw/firewalls",
                &[("tenant_id", "t-1".to_string())],
                |request| request,
                |status, text| Error::HttpError(format!("{status}: {text}")),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_execute_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fw/firewalls/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new("fwaas", server.uri(), Duration::from_secs(5))
            .unwrap()
            .build()
            .unwrap();

        let err = client
            .execute(
                Method::GET,
                "fw/firewalls/missing",
                &[],
                |request| request,
                |status, text| match status {
                    StatusCode::NOT_FOUND => Error::NotFound(text),
                    _ => Error::HttpError(text),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, Error::NotFound("gone".to_string()));
    }
}
