//! The `Firewall` resource: a named binding of a firewall policy to a
//! tenant's traffic.

use neutron_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// A firewall as exchanged with the Neutron FWaaS extension.
///
/// Instances are immutable: they are produced either by deserializing a
/// response body or by [`FirewallBuilder::build`], and carry no setters.
/// "Updating" one means seeding a builder via [`Firewall::to_builder`] and
/// building a new value. The serde field names are the wire contract
/// (`id`, `tenant_id`, `name`, `description`, `admin_state_up`, `status`,
/// `firewall_policy_id`); absent optional fields deserialize to `None` and
/// are omitted again on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Firewall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    admin_state_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    firewall_policy_id: Option<String>,
}

impl Firewall {
    /// Server-assigned identifier, absent for not-yet-created firewalls.
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

    /// Administrative state flag.
    #[must_use]
    pub fn admin_state_up(&self) -> bool {
        self.admin_state_up
    }

    /// Server-reported status (e.g. `ACTIVE`, `PENDING_CREATE`).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Identifier of the policy this firewall enforces.
    ///
    /// Cross-resource relationships are identifier strings, never object
    /// references.
    #[must_use]
    pub fn firewall_policy_id(&self) -> Option<&str> {
        self.firewall_policy_id.as_deref()
    }

    /// Start a fresh builder.
    #[must_use]
    pub fn builder() -> FirewallBuilder {
        FirewallBuilder::default()
    }

    /// Start a builder pre-populated from this firewall.
    #[must_use]
    pub fn to_builder(&self) -> FirewallBuilder {
        FirewallBuilder::from_firewall(self)
    }
}

/// Mutable staging companion for [`Firewall`].
///
/// Setters chain and store values verbatim; `build` may be called any number
/// of times, with further setter calls in between. Builders are single-writer
/// objects: share records freely, not builders.
#[derive(Debug, Default, Clone)]
pub struct FirewallBuilder {
    id: Option<String>,
    tenant_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    admin_state_up: bool,
    status: Option<String>,
    firewall_policy_id: Option<String>,
}

impl FirewallBuilder {
    /// Seed a builder from an existing firewall.
    #[must_use]
    pub fn from_firewall(firewall: &Firewall) -> Self {
        Self {
            id: firewall.id.clone(),
            tenant_id: firewall.tenant_id.clone(),
            name: firewall.name.clone(),
            description: firewall.description.clone(),
            admin_state_up: firewall.admin_state_up,
            status: firewall.status.clone(),
            firewall_policy_id: firewall.firewall_policy_id.clone(),
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

    /// Set the administrative state flag.
    #[must_use]
    pub fn admin_state_up(mut self, admin_state_up: bool) -> Self {
        self.admin_state_up = admin_state_up;
        self
    }

    /// Set the status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the firewall policy identifier.
    #[must_use]
    pub fn firewall_policy_id(mut self, firewall_policy_id: impl Into<String>) -> Self {
        self.firewall_policy_id = Some(firewall_policy_id.into());
        self
    }

    /// Build a firewall from the current staged values.
    ///
    /// Does not consume or clear the builder.
    #[must_use]
    pub fn build(&self) -> Firewall {
        Firewall {
            id: self.id.clone(),
            tenant_id: self.tenant_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            admin_state_up: self.admin_state_up,
            status: self.status.clone(),
            firewall_policy_id: self.firewall_policy_id.clone(),
        }
    }
}

/// Query parameters for listing firewalls.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FirewallListParams {
    /// Filter by tenant.
    pub tenant_id: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by administrative state.
    pub admin_state_up: Option<bool>,
    /// Filter by status string.
    pub status: Option<String>,
    /// Filter by attached policy.
    pub firewall_policy_id: Option<String>,
}

impl FirewallListParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("tenant_id", self.tenant_id.as_ref());
        params.push_opt("name", self.name.as_ref());
        params.push_opt("admin_state_up", self.admin_state_up);
        params.push_opt("status", self.status.as_ref());
        params.push_opt("firewall_policy_id", self.firewall_policy_id.as_ref());
        params.into_pairs()
    }
}
