//! Actor-based polling
//!
//! Each monitored target gets its own agent actor running as an
//! independent async task. Actors are controlled through an mpsc command
//! channel and publish the outcome of every poll cycle to a broadcast
//! channel that any number of consumers may subscribe to.
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → Run poll cycle → Publish SampleEvent → [sinks, ...]
//!     ↑
//!     └─── Commands (PollNow, UpdateInterval, Shutdown)
//! ```
//!
//! Agents are fully independent of each other; nothing is shared between
//! them, so distinct targets poll in parallel while cycles for one target
//! stay strictly sequential.

pub mod agent;
pub mod messages;
