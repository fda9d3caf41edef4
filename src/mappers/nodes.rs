//! Mapper for the per-node resource usage list

use serde_json::Value;
use tracing::warn;

use crate::{
    MetricSample,
    snapshot::{bool_field, num_field, ratio, str_field},
};

pub fn map(document: &Value) -> Vec<MetricSample> {
    let Some(nodes) = document.as_array() else {
        warn!("node snapshot is not a list, nothing to map");
        return Vec::new();
    };

    let mut samples = Vec::new();
    for node in nodes {
        let Some(name) = str_field(node, "name") else {
            warn!("node entry without a name, skipping");
            continue;
        };

        samples.push(MetricSample::new(
            format!("Node/MemoryUsage/{name}"),
            "Percentage",
            ratio(num_field(node, "mem_used"), num_field(node, "mem_limit")),
        ));
        samples.push(MetricSample::new(
            format!("Node/DiskUsage/{name}"),
            "Percentage",
            ratio(
                num_field(node, "disk_free_limit"),
                num_field(node, "disk_free"),
            ),
        ));
        samples.push(MetricSample::new(
            format!("Node/ProcUsage/{name}"),
            "Percentage",
            ratio(num_field(node, "proc_used"), num_field(node, "proc_total")),
        ));
        samples.push(MetricSample::new(
            format!("Node/FileDescUsage/{name}"),
            "Percentage",
            ratio(num_field(node, "fd_used"), num_field(node, "fd_total")),
        ));
        samples.push(MetricSample::new(
            format!("Node/SocketUsage/{name}"),
            "Percentage",
            ratio(
                num_field(node, "sockets_used"),
                num_field(node, "sockets_total"),
            ),
        ));
        samples.push(MetricSample::new(
            format!("Node/Running/{name}"),
            "Running",
            if bool_field(node, "running") { 1.0 } else { 0.0 },
        ));
    }

    samples
}
