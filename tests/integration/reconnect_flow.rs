//! Integration tests for recognizing a runtime across reconnects
//!
//! Tests the flow: discovery attribute map -> identity -> store entries
//! keyed by identity -> session end clears the connection's family.

use vmprobe::{ConnectionIdentity, IdentityError, RuntimeAttributes, ScopedStore, StoreValue};

use super::common::fixtures::{attribute_map, runtime_attributes, START_TIME};

#[test]
fn test_discovery_map_and_typed_attributes_agree() {
    let from_map = RuntimeAttributes::from_attribute_map(&attribute_map(START_TIME))
        .expect("fixture map is complete");
    assert_eq!(from_map, runtime_attributes(START_TIME));

    assert_eq!(
        ConnectionIdentity::from_attributes(&from_map).unwrap(),
        ConnectionIdentity::from_attributes(&runtime_attributes(START_TIME)).unwrap()
    );
}

#[test]
fn test_reconnect_finds_cached_handles() {
    let store = ScopedStore::new();

    let first = ConnectionIdentity::from_attributes(&runtime_attributes(START_TIME)).unwrap();
    store.insert(Some(first.as_str()), false, "service:jmx:rmi:///jndi/rmi://orders:7091/jmxrmi");

    // New connection handle, same runtime
    let again = ConnectionIdentity::from_source(&runtime_attributes(START_TIME)).unwrap();
    assert_eq!(again, first);
    assert_eq!(
        store.get(again.as_str()).and_then(|v| v.as_text().map(str::to_string)),
        Some("service:jmx:rmi:///jndi/rmi://orders:7091/jmxrmi".to_string())
    );
}

#[test]
fn test_restarted_runtime_is_a_new_identity() {
    let before = ConnectionIdentity::from_attributes(&runtime_attributes(START_TIME)).unwrap();
    let after = ConnectionIdentity::from_attributes(&runtime_attributes(START_TIME + 60_000)).unwrap();
    assert_ne!(before, after);
}

#[test]
fn test_session_end_clears_only_its_family() {
    let store = ScopedStore::new();
    let identity = ConnectionIdentity::from_attributes(&runtime_attributes(START_TIME)).unwrap();
    let family = identity.as_str();

    let persistent = store.insert(Some("preferences"), false, "keep");
    let mbeans = store.insert(
        Some(family),
        true,
        StoreValue::List(vec!["jdk.management.jfr:type=FlightRecorder".to_string()]),
    );
    let template = store.insert(Some(family), true, b"<configuration/>".to_vec());
    let other = store.insert(Some("other-session"), true, "unrelated");

    assert_eq!(store.clear_family(family, &[template.as_str()]), 1);

    assert!(!store.has_key(&mbeans));
    assert!(store.has_key(&template));
    assert!(store.has_key(&persistent));
    assert!(store.has_key(&other));
}

#[test]
fn test_incomplete_discovery_map_fails() {
    let mut map = attribute_map(START_TIME);
    map.remove("StartTime");
    assert!(matches!(
        RuntimeAttributes::from_attribute_map(&map),
        Err(IdentityError::MetricsUnavailable(_))
    ));
}
