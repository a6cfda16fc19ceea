//! The `FirewallRule` resource and its `IpVersion` enumeration.

use std::fmt;

use neutron_core::query::QueryParams;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// IP protocol version carried by a firewall rule.
///
/// On the wire this is numeric. Parsing is tolerant: any recognizable
/// integer other than 6 maps to [`IpVersion::V4`], and a non-numeric value
/// maps to [`IpVersion::Unrecognized`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
    /// A value this SDK does not understand
    Unrecognized,
}

impl IpVersion {
    /// The numeric version, or `None` for [`IpVersion::Unrecognized`].
    #[must_use]
    pub const fn version(self) -> Option<u8> {
        match self {
            Self::V4 => Some(4),
            Self::V6 => Some(6),
            Self::Unrecognized => None,
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(6) => Self::V6,
            Ok(_) => Self::V4,
            Err(_) => Self::Unrecognized,
        }
    }
}

impl Serialize for IpVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.version() {
            Some(version) => serializer.serialize_u8(version),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for IpVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IpVersionVisitor;

        impl Visitor<'_> for IpVersionVisitor {
            type Value = IpVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an IP version number or numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match value {
                    6 => IpVersion::V6,
                    _ => IpVersion::V4,
                })
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match value {
                    6 => IpVersion::V6,
                    _ => IpVersion::V4,
                })
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(IpVersion::from_value(value))
            }
        }

        deserializer.deserialize_any(IpVersionVisitor)
    }
}

/// A firewall rule as exchanged with the Neutron FWaaS extension.
///
/// Immutable; this layer is a typed data carrier and performs no cross-field
/// validation (an IPv6 rule with an IPv4 address literal is the server's
/// problem to reject).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirewallRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    firewall_policy_id: Option<String>,
    #[serde(default)]
    shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip_version: Option<IpVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(default)]
    enabled: bool,
}

impl FirewallRule {
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

    /// Identifier of the policy this rule belongs to, if any.
    #[must_use]
    pub fn firewall_policy_id(&self) -> Option<&str> {
        self.firewall_policy_id.as_deref()
    }

    /// Whether the rule is visible to other tenants.
    #[must_use]
    pub fn shared(&self) -> bool {
        self.shared
    }

    /// Matched protocol (`tcp`, `udp`, `icmp`, ...).
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// IP version the rule applies to.
    #[must_use]
    pub fn ip_version(&self) -> Option<IpVersion> {
        self.ip_version
    }

    /// Source address or CIDR.
    #[must_use]
    pub fn source_ip_address(&self) -> Option<&str> {
        self.source_ip_address.as_deref()
    }

    /// Destination address or CIDR.
    #[must_use]
    pub fn destination_ip_address(&self) -> Option<&str> {
        self.destination_ip_address.as_deref()
    }

    /// Source port or port range (e.g. `"80"`, `"8000:8080"`).
    #[must_use]
    pub fn source_port(&self) -> Option<&str> {
        self.source_port.as_deref()
    }

    /// Destination port or port range.
    #[must_use]
    pub fn destination_port(&self) -> Option<&str> {
        self.destination_port.as_deref()
    }

    /// One-based position inside the owning policy.
    #[must_use]
    pub fn position(&self) -> Option<i32> {
        self.position
    }

    /// Action taken on match (`allow` or `deny`).
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Whether the rule is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Start a fresh builder.
    #[must_use]
    pub fn builder() -> FirewallRuleBuilder {
        FirewallRuleBuilder::default()
    }

    /// Start a builder pre-populated from this rule.
    #[must_use]
    pub fn to_builder(&self) -> FirewallRuleBuilder {
        FirewallRuleBuilder::from_firewall_rule(self)
    }
}

/// Mutable staging companion for [`FirewallRule`].
#[derive(Debug, Default, Clone)]
pub struct FirewallRuleBuilder {
    id: Option<String>,
    tenant_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    firewall_policy_id: Option<String>,
    shared: bool,
    protocol: Option<String>,
    ip_version: Option<IpVersion>,
    source_ip_address: Option<String>,
    destination_ip_address: Option<String>,
    source_port: Option<String>,
    destination_port: Option<String>,
    position: Option<i32>,
    action: Option<String>,
    enabled: bool,
}

impl FirewallRuleBuilder {
    /// Seed a builder from an existing rule.
    #[must_use]
    pub fn from_firewall_rule(rule: &FirewallRule) -> Self {
        Self {
            id: rule.id.clone(),
            tenant_id: rule.tenant_id.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            firewall_policy_id: rule.firewall_policy_id.clone(),
            shared: rule.shared,
            protocol: rule.protocol.clone(),
            ip_version: rule.ip_version,
            source_ip_address: rule.source_ip_address.clone(),
            destination_ip_address: rule.destination_ip_address.clone(),
            source_port: rule.source_port.clone(),
            destination_port: rule.destination_port.clone(),
            position: rule.position,
            action: rule.action.clone(),
            enabled: rule.enabled,
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

    /// Set the owning policy identifier.
    #[must_use]
    pub fn firewall_policy_id(mut self, firewall_policy_id: impl Into<String>) -> Self {
        self.firewall_policy_id = Some(firewall_policy_id.into());
        self
    }

    /// Set the shared flag.
    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Set the protocol.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the IP version.
    #[must_use]
    pub fn ip_version(mut self, ip_version: IpVersion) -> Self {
        self.ip_version = Some(ip_version);
        self
    }

    /// Set the source address or CIDR.
    #[must_use]
    pub fn source_ip_address(mut self, source_ip_address: impl Into<String>) -> Self {
        self.source_ip_address = Some(source_ip_address.into());
        self
    }

    /// Set the destination address or CIDR.
    #[must_use]
    pub fn destination_ip_address(mut self, destination_ip_address: impl Into<String>) -> Self {
        self.destination_ip_address = Some(destination_ip_address.into());
        self
    }

    /// Set the source port or port range.
    #[must_use]
    pub fn source_port(mut self, source_port: impl Into<String>) -> Self {
        self.source_port = Some(source_port.into());
        self
    }

    /// Set the destination port or port range.
    #[must_use]
    pub fn destination_port(mut self, destination_port: impl Into<String>) -> Self {
        self.destination_port = Some(destination_port.into());
        self
    }

    /// Set the position inside the owning policy.
    #[must_use]
    pub fn position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build a rule from the current staged values.
    ///
    /// Does not consume or clear the builder.
    #[must_use]
    pub fn build(&self) -> FirewallRule {
        FirewallRule {
            id: self.id.clone(),
            tenant_id: self.tenant_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            firewall_policy_id: self.firewall_policy_id.clone(),
            shared: self.shared,
            protocol: self.protocol.clone(),
            ip_version: self.ip_version,
            source_ip_address: self.source_ip_address.clone(),
            destination_ip_address: self.destination_ip_address.clone(),
            source_port: self.source_port.clone(),
            destination_port: self.destination_port.clone(),
            position: self.position,
            action: self.action.clone(),
            enabled: self.enabled,
        }
    }
}

/// Query parameters for listing firewall rules.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FirewallRuleListParams {
    /// Filter by tenant.
    pub tenant_id: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by owning policy.
    pub firewall_policy_id: Option<String>,
    /// Filter by shared flag.
    pub shared: Option<bool>,
    /// Filter by protocol.
    pub protocol: Option<String>,
    /// Filter by IP version.
    pub ip_version: Option<IpVersion>,
    /// Filter by action.
    pub action: Option<String>,
    /// Filter by enabled flag.
    pub enabled: Option<bool>,
}

impl FirewallRuleListParams {
    /// Convert to URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("tenant_id", self.tenant_id.as_ref());
        params.push_opt("name", self.name.as_ref());
        params.push_opt("firewall_policy_id", self.firewall_policy_id.as_ref());
        params.push_opt("shared", self.shared);
        params.push_opt("protocol", self.protocol.as_ref());
        params.push_opt_with("ip_version", self.ip_version, |v| match v.version() {
            Some(version) => version.to_string(),
            None => String::new(),
        });
        params.push_opt("action", self.action.as_ref());
        params.push_opt("enabled", self.enabled);
        params.into_pairs()
    }
}
