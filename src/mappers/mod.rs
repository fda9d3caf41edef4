//! Snapshot-to-sample mappers, one per management API document shape
//!
//! Every mapper is a pure translation from one polled JSON document to an
//! ordered sequence of [`MetricSample`]s. The only state any of them
//! touches is the per-agent [`CounterRates`] registry, and only for the
//! overview's cumulative message counters.

pub mod endpoints;
pub mod nodes;
pub mod overview;
pub mod queues;

use std::time::Instant;

use serde_json::Value;

use crate::{MetricSample, rate::CounterRates, snapshot::SnapshotKind};

/// Dispatch a fetched document to the mapper for its kind.
///
/// `now` stamps all rate-tracked counters in the document with a single
/// reading time, so every counter of one cycle observes the same interval.
pub fn map_snapshot(
    kind: SnapshotKind,
    document: &Value,
    rates: &mut CounterRates,
    now: Instant,
) -> Vec<MetricSample> {
    match kind {
        SnapshotKind::Overview => overview::map(document, rates, now),
        SnapshotKind::Nodes => nodes::map(document),
        SnapshotKind::Queues => queues::map(document),
        SnapshotKind::EndpointHealth => endpoints::map(document),
    }
}
