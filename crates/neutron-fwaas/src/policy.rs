//! The `FirewallPolicy` resource: an ordered collection of firewall rules.

use neutron_core::query::QueryParams;
use serde::{Deserialize, Deserializer, Serialize};

/// A firewall policy as exchanged with the Neutron FWaaS extension.
///
/// Immutable, like every record in this crate. Rules are referenced by
/// identifier in `firewall_rules`; a wire `null` or missing list normalizes
/// to an empty vector, and the stored vector is only ever exposed as a
/// read-only slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirewallPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    shared: bool,
    #[serde(default, deserialize_with = "rules_from_wire")]
    firewall_rules: Vec<String>,
    #[serde(default)]
    audited: bool,
}

// Neutron may send `"firewall_rules": null` for a policy with no rules.
fn rules_from_wire<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let rules = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(rules.unwrap_or_default())
}

impl FirewallPolicy {
    /// Server-assigned identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Owning tenant identifier.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the policy is visible to other tenants.
    #[must_use]
    pub fn shared(&self) -> bool {
        self.shared
    }

    /// Ordered rule identifiers, never null.
    #[must_use]
    pub fn firewall_rules(&self) -> &[String] {
        &self.firewall_rules
    }

    /// Whether the policy has been audited since its last change.
    #[must_use]
    pub fn audited(&self) -> bool {
        self.audited
    }

    /// Start a fresh builder.
    #[must_use]
    pub fn builder() -> FirewallPolicyBuilder {
        FirewallPolicyBuilder::default()
    }

    /// Start a builder pre-populated from this policy.
    #[must_use]
    pub fn to_builder(&self) -> FirewallPolicyBuilder {
        FirewallPolicyBuilder::from_firewall_policy(self)
    }
}

/// Mutable staging companion for [`FirewallPolicy`].
#[derive(Debug, Default, Clone)]
pub struct FirewallPolicyBuilder {
    id: Option<String>,
    tenant_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    shared: bool,
    firewall_rules: Vec<String>,
    audited: bool,
}

impl FirewallPolicyBuilder {
    /// Seed a builder from an existing policy.
    #[must_use]
    pub fn from_firewall_policy(policy: &FirewallPolicy) -> Self {
        Self {
            id: policy.id.clone(),
            tenant_id: policy.tenant_id.clone(),
            name: policy.name.clone(),
            description: policy.description.clone(),
            shared: policy.shared,
            firewall_rules: policy.firewall_rules.clone(),
            audited: policy.audited,
        }
    }

    /// Set the identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the tenant identifier.
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the shared flag.
    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Set the ordered rule identifiers, replacing any previously staged
    /// list. The input is copied; later mutation of the caller's vector does
    /// not reach the builder or any built policy.
    #[must_use]
    pub fn firewall_rules(mut self, firewall_rules: impl Into<Vec<String>>) -> Self {
        self.firewall_rules = firewall_rules.into();
        self
    }

    /// Set the audited flag.
    #[must_use]
    pub fn audited(mut self, audited: bool) -> Self {
        self.audited = audited;
        self
    }

    /// Build a policy from the current staged values.
    ///
    /// Does not consume or clear the builder.
    #[must_use]
    pub fn build(&self) -> FirewallPolicy {
        FirewallPolicy {
            id: self.id.clone(),
            tenant_id: self.tenant_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            shared: self.shared,
            firewall_rules: self.firewall_rules.clone(),
            audited: self.audited,
        }
    }
}

/// Rule placement for the policy `insert_rule` operation.
///
/// Neutron positions the rule first when neither anchor is given, otherwise
/// relative to `insert_after` / `insert_before`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInsertion {
    firewall_rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    insert_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insert_before: Option<String>,
}

impl RuleInsertion {
    /// Insert the rule at the head of the policy.
    #[must_use]
    pub fn first(firewall_rule_id: impl Into<String>) -> Self {
        Self {
            firewall_rule_id: firewall_rule_id.into(),
            insert_after: None,
            insert_before: None,
        }
    }

    /// Insert the rule directly after another rule.
    #[must_use]
    pub fn after(firewall_rule_id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            firewall_rule_id: firewall_rule_id.into(),
            insert_after: Some(anchor.into()),
            insert_before: None,
        }
    }

    /// Insert the rule directly before another rule.
    #[must_use]
    pub fn before(firewall_rule_id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            firewall_rule_id: firewall_rule_id.into(),
            insert_after: None,
            insert_before: Some(anchor.into()),
        }
    }

    /// Identifier of the rule being inserted.
    #[must_use]
    pub fn firewall_rule_id(&self) -> &str {
        &self.firewall_rule_id
    }
}

/// Query parameters for listing firewall policies.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FirewallPolicyListParams {
    /// Filter by tenant.
    pub tenant_id: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by shared flag.
    pub shared: Option<bool>,
    /// Filter by audited flag.
    pub audited: Option<bool>,
}

impl FirewallPolicyListParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("tenant_id", self.tenant_id.as_ref());
        params.push_opt("name", self.name.as_ref());
        params.push_opt("shared", self.shared);
        params.push_opt("audited", self.audited);
        params.into_pairs()
    }
}
