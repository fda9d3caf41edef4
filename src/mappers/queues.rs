//! Mapper for the per-queue depth list

use serde_json::Value;
use tracing::warn;

use crate::{
    MetricSample,
    snapshot::{num_field, str_field},
};

pub fn map(document: &Value) -> Vec<MetricSample> {
    let Some(queues) = document.as_array() else {
        warn!("queue snapshot is not a list, nothing to map");
        return Vec::new();
    };

    let mut samples = Vec::new();
    for queue in queues {
        let Some(name) = str_field(queue, "name") else {
            warn!("queue entry without a name, skipping");
            continue;
        };
        let vhost = vhost_label(str_field(queue, "vhost").unwrap_or(""));
        let prefix = format!("Queues/{vhost}/{name}");

        samples.push(MetricSample::new(
            format!("{prefix}/Messages/Total"),
            "Messages",
            num_field(queue, "messages"),
        ));
        samples.push(MetricSample::new(
            format!("{prefix}/Messages/Ready"),
            "Messages",
            num_field(queue, "messages_ready"),
        ));
        samples.push(MetricSample::new(
            format!("{prefix}/Messages/NoAck"),
            "Messages",
            num_field(queue, "messages_unacknowledged"),
        ));
        samples.push(MetricSample::new(
            format!("{prefix}/Consumers"),
            "Consumers",
            num_field(queue, "consumers"),
        ));
    }

    samples
}

/// The default virtual host is named exactly `/`, which would mangle the
/// slash-delimited metric path; it is rendered as `Root`. Every other
/// vhost name passes through unchanged.
fn vhost_label(vhost: &str) -> &str {
    if vhost == "/" { "Root" } else { vhost }
}
