//! FWaaS client and domain records for OpenStack Neutron.
//!
//! Provides the immutable `Firewall`, `FirewallPolicy`, and `FirewallRule`
//! records with their wire-mapped builders, plus an asynchronous client for
//! the `fw/` extension endpoints.
//!
//! Records are freely shareable across threads; builders are mutable staging
//! objects and are not, so confine each builder to one task.

#![deny(missing_docs)]

pub mod client;
pub mod firewall;
pub mod policy;
pub mod rule;

pub use client::{FwaasApi, FwaasClient, FwaasClientBuilder};
pub use firewall::{Firewall, FirewallBuilder, FirewallListParams};
pub use policy::{
    FirewallPolicy, FirewallPolicyBuilder, FirewallPolicyListParams, RuleInsertion,
};
pub use rule::{FirewallRule, FirewallRuleBuilder, FirewallRuleListParams, IpVersion};

/// Convenient result alias that reuses the shared Neutron error type.
pub type Result<T> = neutron_core::Result<T>;
