//! Asynchronous client for the Neutron FWaaS extension.
//!
//! Endpoints live under `fw/` relative to the versioned Neutron base URL
//! (e.g. `http://neutron:9696/v2.0/fw/firewalls`). Single resources travel
//! wrapped in an envelope keyed by the resource name, collections in one
//! keyed by the plural form; `insert_rule` and `remove_rule` answer with a
//! bare policy object.

use crate::firewall::{Firewall, FirewallListParams};
use crate::policy::{FirewallPolicy, FirewallPolicyListParams, RuleInsertion};
use crate::rule::{FirewallRule, FirewallRuleListParams};
use crate::Result;
use async_trait::async_trait;
use neutron_core::client::{ClientConfig, ServiceClient, ServiceClientBuilder, FWAAS_DEFAULT_TIMEOUT};
use neutron_core::config::NeutronClientConfig;
use neutron_core::Error;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const SERVICE: &str = "fwaas";
const USER_AGENT: &str = concat!("neutron-fwaas/", env!("CARGO_PKG_VERSION"));

/// Operations exposed by the FWaaS extension.
///
/// [`FwaasClient`] is the HTTP implementation; consumers that want to stub
/// the service in their own tests can depend on this trait instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FwaasApi: Send + Sync {
    /// List firewalls with optional filters.
    async fn list_firewalls(&self, params: &FirewallListParams) -> Result<Vec<Firewall>>;
    /// Fetch a single firewall.
    async fn get_firewall(&self, id: &str) -> Result<Firewall>;
    /// Create a firewall.
    async fn create_firewall(&self, firewall: &Firewall) -> Result<Firewall>;
    /// Update a firewall.
    async fn update_firewall(&self, id: &str, firewall: &Firewall) -> Result<Firewall>;
    /// Delete a firewall.
    async fn delete_firewall(&self, id: &str) -> Result<()>;

    /// List firewall policies with optional filters.
    async fn list_policies(&self, params: &FirewallPolicyListParams)
        -> Result<Vec<FirewallPolicy>>;
    /// Fetch a single firewall policy.
    async fn get_policy(&self, id: &str) -> Result<FirewallPolicy>;
    /// Create a firewall policy.
    async fn create_policy(&self, policy: &FirewallPolicy) -> Result<FirewallPolicy>;
    /// Update a firewall policy.
    async fn update_policy(&self, id: &str, policy: &FirewallPolicy) -> Result<FirewallPolicy>;
    /// Delete a firewall policy.
    async fn delete_policy(&self, id: &str) -> Result<()>;
    /// Insert a rule into a policy at the requested position.
    async fn insert_rule(&self, policy_id: &str, insertion: &RuleInsertion)
        -> Result<FirewallPolicy>;
    /// Remove a rule from a policy.
    async fn remove_rule(&self, policy_id: &str, rule_id: &str) -> Result<FirewallPolicy>;

    /// List firewall rules with optional filters.
    async fn list_rules(&self, params: &FirewallRuleListParams) -> Result<Vec<FirewallRule>>;
    /// Fetch a single firewall rule.
    async fn get_rule(&self, id: &str) -> Result<FirewallRule>;
    /// Create a firewall rule.
    async fn create_rule(&self, rule: &FirewallRule) -> Result<FirewallRule>;
    /// Update a firewall rule.
    async fn update_rule(&self, id: &str, rule: &FirewallRule) -> Result<FirewallRule>;
    /// Delete a firewall rule.
    async fn delete_rule(&self, id: &str) -> Result<()>;
}

/// Builder for [`FwaasClient`].
#[derive(Debug, Clone)]
pub struct FwaasClientBuilder {
    inner: ServiceClientBuilder,
}

impl FwaasClientBuilder {
    /// Create a builder for the versioned Neutron base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            SERVICE,
            base_url,
            Duration::from_secs(FWAAS_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from a [`NeutronClientConfig`].
    ///
    /// Carries over the endpoint, timeout, auth token, and TLS verification
    /// setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint URL cannot be parsed.
    pub fn from_config(config: &NeutronClientConfig) -> Result<Self> {
        let endpoint = config.parse_endpoint_url()?;
        let mut builder = ServiceClientBuilder::new(SERVICE, endpoint.as_str(), config.timeout())?
            .with_user_agent(USER_AGENT)
            .with_http_config(
                ClientConfig::new()
                    .with_timeout(config.timeout())
                    .with_tls_verify(config.tls_verify),
            );
        if let Some(token) = &config.auth_token {
            builder = builder.with_token(token.clone());
        }
        Ok(Self { inner: builder })
    }

    /// Configure an X-Auth-Token header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<FwaasClient> {
        let inner = self.inner.build()?;
        Ok(FwaasClient { inner })
    }
}

/// Asynchronous FWaaS client.
#[derive(Clone)]
pub struct FwaasClient {
    inner: ServiceClient,
}

// Response/request envelopes. Neutron nests every body under the resource
// name; requests reuse the domain records directly.
#[derive(Serialize)]
struct FirewallRequest<'a> {
    firewall: &'a Firewall,
}

#[derive(Deserialize)]
struct FirewallResponse {
    firewall: Firewall,
}

#[derive(Deserialize)]
struct FirewallsResponse {
    firewalls: Vec<Firewall>,
}

#[derive(Serialize)]
struct FirewallPolicyRequest<'a> {
    firewall_policy: &'a FirewallPolicy,
}

#[derive(Deserialize)]
struct FirewallPolicyResponse {
    firewall_policy: FirewallPolicy,
}

#[derive(Deserialize)]
struct FirewallPoliciesResponse {
    firewall_policies: Vec<FirewallPolicy>,
}

#[derive(Serialize)]
struct FirewallRuleRequest<'a> {
    firewall_rule: &'a FirewallRule,
}

#[derive(Deserialize)]
struct FirewallRuleResponse {
    firewall_rule: FirewallRule,
}

#[derive(Deserialize)]
struct FirewallRulesResponse {
    firewall_rules: Vec<FirewallRule>,
}

#[derive(Serialize)]
struct RuleRemoval<'a> {
    firewall_rule_id: &'a str,
}

impl FwaasClient {
    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        FwaasClientBuilder::new(base_url)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .inner
            .execute(
                method,
                path,
                params,
                |mut request| {
                    request = request.header("Accept", "application/json");
                    if let Some(payload) = body {
                        request = request.json(payload);
                    }
                    request
                },
                map_status_to_error,
            )
            .await?;

        response.json::<R>().await.map_err(Error::from)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.inner
            .execute(
                Method::DELETE,
                path,
                &[],
                |request| request,
                map_status_to_error,
            )
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl FwaasApi for FwaasClient {
    async fn list_firewalls(&self, params: &FirewallListParams) -> Result<Vec<Firewall>> {
        let response: FirewallsResponse = self
            .send_json::<(), _>(Method::GET, "fw/firewalls", None, &params.to_pairs())
            .await?;
        Ok(response.firewalls)
    }

    async fn get_firewall(&self, id: &str) -> Result<Firewall> {
        let path = format!("fw/firewalls/{id}");
        let response: FirewallResponse =
            self.send_json::<(), _>(Method::GET, &path, None, &[]).await?;
        Ok(response.firewall)
    }

    async fn create_firewall(&self, firewall: &Firewall) -> Result<Firewall> {
        let response: FirewallResponse = self
            .send_json(
                Method::POST,
                "fw/firewalls",
                Some(&FirewallRequest { firewall }),
                &[],
            )
            .await?;
        Ok(response.firewall)
    }

    async fn update_firewall(&self, id: &str, firewall: &Firewall) -> Result<Firewall> {
        let path = format!("fw/firewalls/{id}");
        let response: FirewallResponse = self
            .send_json(Method::PUT, &path, Some(&FirewallRequest { firewall }), &[])
            .await?;
        Ok(response.firewall)
    }

    async fn delete_firewall(&self, id: &str) -> Result<()> {
        self.delete(&format!("fw/firewalls/{id}")).await
    }

    async fn list_policies(
        &self,
        params: &FirewallPolicyListParams,
    ) -> Result<Vec<FirewallPolicy>> {
        let response: FirewallPoliciesResponse = self
            .send_json::<(), _>(Method::GET, "fw/firewall_policies", None, &params.to_pairs())
            .await?;
        Ok(response.firewall_policies)
    }

    async fn get_policy(&self, id: &str) -> Result<FirewallPolicy> {
        let path = format!("fw/firewall_policies/{id}");
        let response: FirewallPolicyResponse =
            self.send_json::<(), _>(Method::GET, &path, None, &[]).await?;
        Ok(response.firewall_policy)
    }

    async fn create_policy(&self, policy: &FirewallPolicy) -> Result<FirewallPolicy> {
        let response: FirewallPolicyResponse = self
            .send_json(
                Method::POST,
                "fw/firewall_policies",
                Some(&FirewallPolicyRequest {
                    firewall_policy: policy,
                }),
                &[],
            )
            .await?;
        Ok(response.firewall_policy)
    }

    async fn update_policy(&self, id: &str, policy: &FirewallPolicy) -> Result<FirewallPolicy> {
        let path = format!("fw/firewall_policies/{id}");
        let response: FirewallPolicyResponse = self
            .send_json(
                Method::PUT,
                &path,
                Some(&FirewallPolicyRequest {
                    firewall_policy: policy,
                }),
                &[],
            )
            .await?;
        Ok(response.firewall_policy)
    }

    async fn delete_policy(&self, id: &str) -> Result<()> {
        self.delete(&format!("fw/firewall_policies/{id}")).await
    }

    async fn insert_rule(
        &self,
        policy_id: &str,
        insertion: &RuleInsertion,
    ) -> Result<FirewallPolicy> {
        let path = format!("fw/firewall_policies/{policy_id}/insert_rule");
        self.send_json(Method::PUT, &path, Some(insertion), &[])
            .await
    }

    async fn remove_rule(&self, policy_id: &str, rule_id: &str) -> Result<FirewallPolicy> {
        let path = format!("fw/firewall_policies/{policy_id}/remove_rule");
        self.send_json(
            Method::PUT,
            &path,
            Some(&RuleRemoval {
                firewall_rule_id: rule_id,
            }),
            &[],
        )
        .await
    }

    async fn list_rules(&self, params: &FirewallRuleListParams) -> Result<Vec<FirewallRule>> {
        let response: FirewallRulesResponse = self
            .send_json::<(), _>(Method::GET, "fw/firewall_rules", None, &params.to_pairs())
            .await?;
        Ok(response.firewall_rules)
    }

    async fn get_rule(&self, id: &str) -> Result<FirewallRule> {
        let path = format!("fw/firewall_rules/{id}");
        let response: FirewallRuleResponse =
            self.send_json::<(), _>(Method::GET, &path, None, &[]).await?;
        Ok(response.firewall_rule)
    }

    async fn create_rule(&self, rule: &FirewallRule) -> Result<FirewallRule> {
        let response: FirewallRuleResponse = self
            .send_json(
                Method::POST,
                "fw/firewall_rules",
                Some(&FirewallRuleRequest { firewall_rule: rule }),
                &[],
            )
            .await?;
        Ok(response.firewall_rule)
    }

    async fn update_rule(&self, id: &str, rule: &FirewallRule) -> Result<FirewallRule> {
        let path = format!("fw/firewall_rules/{id}");
        let response: FirewallRuleResponse = self
            .send_json(
                Method::PUT,
                &path,
                Some(&FirewallRuleRequest { firewall_rule: rule }),
                &[],
            )
            .await?;
        Ok(response.firewall_rule)
    }

    async fn delete_rule(&self, id: &str) -> Result<()> {
        self.delete(&format!("fw/firewall_rules/{id}")).await
    }
}

fn map_status_to_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::BAD_REQUEST => Error::BadRequest(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::AuthFailed(format!("FWaaS authentication failed: {text}"))
        }
        StatusCode::CONFLICT => Error::Conflict(text),
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("FWaaS temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("FWaaS server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("FWaaS error {status}: {text}")),
    }
}
