//! Integration tests for parsing FWaaS response data.
//!
//! These tests validate that the neutron-fwaas records correctly deserialize
//! Neutron response payloads captured from a live deployment.

use std::fs;
use std::path::PathBuf;

use neutron_fwaas::{Firewall, FirewallPolicy, FirewallRule, IpVersion};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture and peel off the Neutron envelope key.
fn load_collection(file: &str, key: &str) -> serde_json::Value {
    let fixture_path = fixtures_dir().join(file);
    let raw = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!("Failed to read fixture at {}: {}", fixture_path.display(), e)
    });
    let mut value: serde_json::Value = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("Fixture {file} is not valid JSON: {e}"));
    value[key].take()
}

#[test]
fn test_deserialize_firewall_list() {
    let firewalls: Vec<Firewall> =
        serde_json::from_value(load_collection("firewall_list.json", "firewalls")).unwrap();

    assert_eq!(firewalls.len(), 2, "Expected 2 firewalls in test data");

    let edge = &firewalls[0];
    assert_eq!(edge.id(), Some("3b0ef8f4-82c7-44d4-a4fb-6177f9a21977"));
    assert_eq!(edge.name(), Some("edge-fw"));
    assert!(edge.admin_state_up());
    assert_eq!(edge.status(), Some("ACTIVE"));
    assert_eq!(
        edge.firewall_policy_id(),
        Some("c69933c1-b472-44f9-8226-30dc4ffd454c")
    );

    // Explicit nulls map to absent, not to errors.
    let staging = &firewalls[1];
    assert_eq!(staging.description(), None);
    assert_eq!(staging.firewall_policy_id(), None);
    assert!(!staging.admin_state_up());
}

#[test]
fn test_deserialize_policy_list() {
    let policies: Vec<FirewallPolicy> = serde_json::from_value(load_collection(
        "firewall_policy_list.json",
        "firewall_policies",
    ))
    .unwrap();

    assert_eq!(policies.len(), 2);

    let edge = &policies[0];
    assert_eq!(edge.name(), Some("edge-policy"));
    assert!(edge.shared());
    assert!(edge.audited());
    assert_eq!(edge.firewall_rules().len(), 2);
    assert_eq!(
        edge.firewall_rules()[0],
        "8722e0e0-9cc9-4490-9660-8c9a5732fbb0"
    );

    // A null rule list normalizes to empty.
    let empty = &policies[1];
    assert!(empty.firewall_rules().is_empty());
    assert!(!empty.audited());
}

#[test]
fn test_deserialize_rule_list() {
    let rules: Vec<FirewallRule> =
        serde_json::from_value(load_collection("firewall_rule_list.json", "firewall_rules"))
            .unwrap();

    assert_eq!(rules.len(), 2);

    let ssh = &rules[0];
    assert_eq!(ssh.name(), Some("allow-ssh"));
    assert_eq!(ssh.protocol(), Some("tcp"));
    assert_eq!(ssh.ip_version(), Some(IpVersion::V4));
    assert_eq!(ssh.source_ip_address(), Some("192.0.2.0/24"));
    assert_eq!(ssh.destination_port(), Some("22"));
    assert_eq!(ssh.position(), Some(1));
    assert_eq!(ssh.action(), Some("allow"));
    assert!(ssh.enabled());

    let v6 = &rules[1];
    assert_eq!(v6.ip_version(), Some(IpVersion::V6));
    assert_eq!(v6.protocol(), None);
    assert_eq!(v6.destination_ip_address(), Some("2001:db8::/32"));
    assert!(!v6.enabled());
}

#[test]
fn test_fixture_round_trip_through_builders() {
    let rules: Vec<FirewallRule> =
        serde_json::from_value(load_collection("firewall_rule_list.json", "firewall_rules"))
            .unwrap();

    for rule in &rules {
        let rebuilt = rule.to_builder().build();
        assert_eq!(rule, &rebuilt);
    }
}

#[test]
fn test_fixture_round_trip_serialization() {
    let firewalls: Vec<Firewall> =
        serde_json::from_value(load_collection("firewall_list.json", "firewalls")).unwrap();

    for original in &firewalls {
        let serialized = serde_json::to_string(original).unwrap();
        let deserialized: Firewall = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, &deserialized);
    }
}
