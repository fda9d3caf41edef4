//! Message types for actor communication

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::MetricSample;

/// Event published after every poll cycle
///
/// Carries every sample the cycle produced plus a rendered description of
/// each snapshot fetch that failed. The broadcast channel may lag or drop
/// events for slow subscribers - this is acceptable as samples are
/// regenerated every cycle.
#[derive(Debug, Clone)]
pub struct SampleEvent {
    /// Stable agent identity (the configured name)
    pub agent_id: String,

    /// Version label for everything this agent reports
    pub version: String,

    /// All samples derived this cycle, across all snapshot kinds
    pub samples: Vec<MetricSample>,

    /// One entry per snapshot kind that could not be fetched
    pub failures: Vec<String>,

    /// When the cycle completed
    pub timestamp: DateTime<Utc>,
}

/// Commands that can be sent to an agent actor
#[derive(Debug)]
pub enum AgentCommand {
    /// Trigger an immediate poll cycle (bypassing the interval timer)
    ///
    /// Responds with an error only when the cycle produced no samples at
    /// all; a partially failed cycle still counts as success.
    PollNow {
        respond_to: oneshot::Sender<anyhow::Result<()>>,
    },

    /// Update the polling interval
    UpdateInterval { interval_secs: u64 },

    /// Gracefully shut down the agent
    ///
    /// The actor finishes any in-flight cycle and then exits.
    Shutdown,
}
