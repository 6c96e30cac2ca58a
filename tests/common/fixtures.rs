//! Fixture data for a monitored runtime and its rule catalog

use std::collections::HashMap;

use serde_json::{json, Value};
use vmprobe::{InputArguments, RuleEntry, RuntimeAttributes, StaticCatalog};

pub const START_TIME: i64 = 1_700_000_000_000;

/// Attributes of the fixture runtime started at `start_time`
pub fn runtime_attributes(start_time: i64) -> RuntimeAttributes {
    RuntimeAttributes {
        class_path: "/srv/orders/orders.jar:/srv/orders/lib/*".to_string(),
        name: "31337@orders-7f9c".to_string(),
        input_arguments: InputArguments::Strings(vec![
            "-Xmx4g".to_string(),
            "-XX:+FlightRecorder".to_string(),
        ]),
        library_path: "/usr/java/packages/lib:/usr/lib64".to_string(),
        vm_vendor: "Eclipse Adoptium".to_string(),
        vm_version: "21.0.2+13-LTS".to_string(),
        start_time,
    }
}

/// The same runtime as a discovery layer reports it
pub fn attribute_map(start_time: i64) -> HashMap<String, Value> {
    [
        ("ClassPath", json!("/srv/orders/orders.jar:/srv/orders/lib/*")),
        ("Name", json!("31337@orders-7f9c")),
        ("InputArguments", json!(["-Xmx4g", "-XX:+FlightRecorder"])),
        ("LibraryPath", json!("/usr/java/packages/lib:/usr/lib64")),
        ("VmVendor", json!("Eclipse Adoptium")),
        ("VmVersion", json!("21.0.2+13-LTS")),
        ("StartTime", json!(start_time)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn rule_catalog() -> StaticCatalog {
    [
        RuleEntry::new("GcPause", "gc"),
        RuleEntry::new("GcFrequency", "gc"),
        RuleEntry::new("HeapContent", "memory"),
        RuleEntry::new("Allocations", "memory"),
        RuleEntry::new("HotMethods", "code"),
        RuleEntry::new("ThrownExceptions", "exceptions"),
    ]
    .into_iter()
    .collect()
}
