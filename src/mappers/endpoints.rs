//! Mapper for the Neuron ESB endpoint health list
//!
//! Emits pre-aggregated `Summary/*` totals across all endpoints first,
//! then one group of samples per endpoint. The totals are plain sums over
//! the list; none of these readings is cumulative, so nothing here is
//! rate-converted.

use serde_json::Value;
use tracing::warn;

use crate::{
    MetricSample,
    snapshot::{num_field_any, str_field_any},
};

const HEARTBEATS: [&str; 2] = ["Heartbeats", "heartbeats"];
const ERRORS: [&str; 2] = ["Errors", "errors"];
const WARNINGS: [&str; 2] = ["Warnings", "warnings"];
const MESSAGE_RATE: [&str; 2] = ["MessageRate", "messageRate"];
const MESSAGES_PROCESSED: [&str; 2] = ["MessagesProcessed", "messagesProcessed"];
const NAME: [&str; 2] = ["Name", "name"];

pub fn map(document: &Value) -> Vec<MetricSample> {
    let Some(endpoints) = document.as_array() else {
        warn!("endpoint health snapshot is not a list, nothing to map");
        return Vec::new();
    };

    let mut samples = Vec::new();

    let sum = |keys: &[&str]| {
        endpoints
            .iter()
            .map(|endpoint| num_field_any(endpoint, keys))
            .sum::<f64>()
    };
    samples.push(MetricSample::new("Summary/Heartbeat", "checks", sum(&HEARTBEATS)));
    samples.push(MetricSample::new("Summary/Error", "messages", sum(&ERRORS)));
    samples.push(MetricSample::new("Summary/Warning", "messages", sum(&WARNINGS)));
    samples.push(MetricSample::new(
        "Summary/MessageRate",
        "messages",
        sum(&MESSAGE_RATE),
    ));
    samples.push(MetricSample::new(
        "Summary/MessagesProcessed",
        "messages",
        sum(&MESSAGES_PROCESSED),
    ));

    for endpoint in endpoints {
        let Some(name) = str_field_any(endpoint, &NAME) else {
            warn!("endpoint health entry without a name, skipping");
            continue;
        };

        samples.push(MetricSample::new(
            format!("Heartbeat/{name}"),
            "checks",
            num_field_any(endpoint, &HEARTBEATS),
        ));
        samples.push(MetricSample::new(
            format!("Error/{name}"),
            "messages",
            num_field_any(endpoint, &ERRORS),
        ));
        samples.push(MetricSample::new(
            format!("Warning/{name}"),
            "messages",
            num_field_any(endpoint, &WARNINGS),
        ));
        samples.push(MetricSample::new(
            format!("MessageRate/{name}"),
            "messages",
            num_field_any(endpoint, &MESSAGE_RATE),
        ));
        samples.push(MetricSample::new(
            format!("MessagesProcessed/{name}"),
            "messages",
            num_field_any(endpoint, &MESSAGES_PROCESSED),
        ));
    }

    samples
}
