//! Snapshot kinds and lenient field access
//!
//! Polled documents are kept as raw [`serde_json::Value`] trees instead of
//! being deserialized into structs: a single field of unexpected shape
//! must only lose that field, not the whole snapshot. The accessors here
//! implement that policy — missing or null fields fall back to a default,
//! wrong-typed fields are logged and fall back to the same default.

use std::fmt;

use serde_json::Value;
use tracing::warn;

/// The management API documents this crate knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// Cluster-wide totals and message statistics (`/api/overview`)
    Overview,
    /// Per-node resource usage (`/api/nodes`)
    Nodes,
    /// Per-queue depths and consumer counts (`/api/queues`)
    Queues,
    /// Neuron ESB endpoint health list
    EndpointHealth,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SnapshotKind::Overview => "overview",
            SnapshotKind::Nodes => "nodes",
            SnapshotKind::Queues => "queues",
            SnapshotKind::EndpointHealth => "endpoint health",
        };
        write!(f, "{label}")
    }
}

/// Read an optional numeric field; missing and null yield `0.0`.
pub fn num_field(element: &Value, key: &str) -> f64 {
    match element.get(key) {
        None | Some(Value::Null) => 0.0,
        Some(value) => num_value(key, value),
    }
}

/// Read a numeric field under any of the given key spellings; the first
/// present key wins. Used for documents whose producers disagree on
/// casing (the Neuron API serializes PascalCase, some gateways camelCase).
pub fn num_field_any(element: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match element.get(key) {
            None => continue,
            Some(Value::Null) => return 0.0,
            Some(value) => return num_value(key, value),
        }
    }
    0.0
}

fn num_value(key: &str, value: &Value) -> f64 {
    match value.as_f64() {
        Some(number) => number,
        None => {
            warn!("field `{key}` has unexpected shape {value}, substituting 0");
            0.0
        }
    }
}

/// Read an optional boolean flag; anything but `true`/`false` yields
/// `false`.
pub fn bool_field(element: &Value, key: &str) -> bool {
    match element.get(key) {
        None | Some(Value::Null) => false,
        Some(value) => match value.as_bool() {
            Some(flag) => flag,
            None => {
                warn!("field `{key}` has unexpected shape {value}, substituting false");
                false
            }
        },
    }
}

/// Read an optional string field.
pub fn str_field<'a>(element: &'a Value, key: &str) -> Option<&'a str> {
    element.get(key).and_then(Value::as_str)
}

/// Read a string field under any of the given key spellings.
pub fn str_field_any<'a>(element: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| str_field(element, key))
}

/// Ratio of two optional readings; a missing or zero denominator yields
/// `0.0` instead of a division fault.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
