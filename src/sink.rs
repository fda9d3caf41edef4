//! Metric sink seam - where cycle output leaves the process
//!
//! The crate's only contract with a reporting backend is "report every
//! sample produced this cycle". The wire protocol behind that is not this
//! crate's business; [`TracingSink`] stands in for a real backend by
//! writing samples to the log.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::actors::messages::SampleEvent;

/// Downstream reporting contract
///
/// Implementations must be `Send + Sync` as they are driven from an async
/// task. Reporting failures are the sink's own problem; the polling side
/// never retries a cycle.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Report every sample produced in one cycle.
    async fn report(&self, event: &SampleEvent) -> anyhow::Result<()>;
}

/// Sink that emits each sample through `tracing`
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl MetricSink for TracingSink {
    async fn report(&self, event: &SampleEvent) -> anyhow::Result<()> {
        for sample in &event.samples {
            info!(
                agent = %event.agent_id,
                version = %event.version,
                name = %sample.name,
                unit = %sample.unit,
                value = sample.value,
                "sample"
            );
        }
        for failure in &event.failures {
            warn!(agent = %event.agent_id, "cycle was partial: {failure}");
        }
        Ok(())
    }
}

/// Forward broadcast events into a sink until the channel closes.
pub async fn run_sink(mut receiver: broadcast::Receiver<SampleEvent>, sink: impl MetricSink) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                if let Err(e) = sink.report(&event).await {
                    warn!("sink rejected cycle report: {e:#}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("sink lagging, skipped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
