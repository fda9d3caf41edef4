pub mod actors;
pub mod client;
pub mod config;
pub mod error;
pub mod mappers;
pub mod poller;
pub mod rate;
pub mod sink;
pub mod snapshot;

use serde::{Deserialize, Serialize};

/// One named measurement produced during a poll cycle.
///
/// `name` is a slash-delimited hierarchical path (e.g.
/// `Node/MemoryUsage/rabbit@host1`), `unit` a free-form label such as
/// `Messages` or `Percentage`. Samples are produced fresh every cycle and
/// handed downstream as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub unit: String,
    pub value: f64,
}

impl MetricSample {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            value,
        }
    }
}
