//! Mapper for the cluster overview document

use std::time::Instant;

use serde_json::Value;

use crate::{MetricSample, rate::CounterRates, snapshot::num_field};

/// Cumulative counters under `message_stats`, with the metric path each
/// one is reported as. These are the only rate-converted readings.
const RATED_COUNTERS: [(&str, &str); 6] = [
    ("publish", "Messages/Publish"),
    ("ack", "Messages/Ack"),
    ("deliver_get", "Messages/Deliver"),
    ("confirm", "Messages/Confirm"),
    ("redeliver", "Messages/Redeliver"),
    ("get_no_ack", "Messages/NoAck"),
];

pub fn map(document: &Value, rates: &mut CounterRates, now: Instant) -> Vec<MetricSample> {
    let mut samples = Vec::new();

    let totals = document.get("queue_totals").unwrap_or(&Value::Null);
    samples.push(MetricSample::new(
        "Queues/Queued",
        "Messages",
        num_field(totals, "messages"),
    ));
    samples.push(MetricSample::new(
        "Queues/Ready",
        "Messages",
        num_field(totals, "messages_ready"),
    ));
    samples.push(MetricSample::new(
        "Queues/Unacknowledged",
        "Messages",
        num_field(totals, "messages_unacknowledged"),
    ));

    let object_totals = document.get("object_totals").unwrap_or(&Value::Null);
    if let Some(objects) = object_totals.as_object() {
        for key in objects.keys() {
            let label = capitalize(key);
            let count = num_field(object_totals, key);
            samples.push(MetricSample::new(format!("Objects/{label}"), label, count));
        }
    }

    let stats = document.get("message_stats").unwrap_or(&Value::Null);
    for (field, metric) in RATED_COUNTERS {
        let raw = num_field(stats, field);
        let rate = rates.process_at(metric, raw, now);
        samples.push(MetricSample::new(metric, "Messages/Second", rate));
    }

    samples
}

/// Uppercase the first character, leave the rest unchanged.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
