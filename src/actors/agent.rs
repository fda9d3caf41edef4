//! AgentActor - drives poll cycles for one monitored target
//!
//! One actor per configured target. The actor owns the target's poller
//! (and with it the per-counter rate state), runs cycles on an interval,
//! and publishes a [`SampleEvent`] after every cycle.
//!
//! Cycles never overlap: the actor loop is sequential, and the ticker is
//! set to skip missed ticks instead of bursting, so a cycle that outruns
//! its interval simply delays the next one.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, instrument, trace, warn};

use crate::{
    config::{BrokerConfig, EsbConfig},
    error::ConfigResult,
    poller::{AgentPoller, BrokerPoller, EsbPoller},
};

use super::messages::{AgentCommand, SampleEvent};

/// Actor that polls a single management API target
pub struct AgentActor {
    /// The target-specific poller, owning all cross-cycle state
    poller: AgentPoller,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<AgentCommand>,

    /// Broadcast sender for publishing cycle outcomes
    sample_tx: broadcast::Sender<SampleEvent>,

    /// Current polling interval
    interval_duration: Duration,
}

impl AgentActor {
    pub fn new(
        poller: AgentPoller,
        command_rx: mpsc::Receiver<AgentCommand>,
        sample_tx: broadcast::Sender<SampleEvent>,
        interval_secs: u64,
    ) -> Self {
        Self {
            poller,
            command_rx,
            sample_tx,
            interval_duration: Duration::from_secs(interval_secs),
        }
    }

    /// Run the actor's main loop
    ///
    /// This is the entry point for the actor. It runs until:
    /// - A Shutdown command is received
    /// - The command channel is closed
    #[instrument(skip(self), fields(agent = %self.poller.name()))]
    pub async fn run(mut self) {
        debug!("starting agent actor");

        let mut ticker = self.make_ticker();

        loop {
            tokio::select! {
                // Timer tick - run one poll cycle
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!("poll cycle produced nothing: {:#}", e);
                    }
                }

                // Handle commands
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AgentCommand::PollNow { respond_to } => {
                            debug!("received PollNow command");
                            let result = self.poll_once().await;
                            let _ = respond_to.send(result);
                        }

                        AgentCommand::UpdateInterval { interval_secs } => {
                            debug!("updating interval to {interval_secs}s");
                            self.interval_duration = Duration::from_secs(interval_secs);
                            ticker = self.make_ticker();
                        }

                        AgentCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                // Command channel closed - exit
                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("agent actor stopped");
    }

    fn make_ticker(&self) -> tokio::time::Interval {
        let mut ticker = interval(self.interval_duration);
        // a cycle that overruns the interval skips the missed tick
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    /// Run one poll cycle and publish its outcome
    ///
    /// Partial failures are carried inside the event; only a cycle that
    /// produced no samples at all is reported as an error.
    async fn poll_once(&mut self) -> Result<()> {
        let outcome = self.poller.run_cycle().await;

        let event = SampleEvent {
            agent_id: self.poller.name().to_string(),
            version: self.poller.version().to_string(),
            failures: outcome
                .failures
                .iter()
                .map(|failure| format!("{}: {:#}", failure.kind, failure.error))
                .collect(),
            samples: outcome.samples,
            timestamp: Utc::now(),
        };
        let starved = event.samples.is_empty() && !event.failures.is_empty();

        // Publish to broadcast channel
        // Note: We ignore send errors. It's OK if there are no subscribers.
        match self.sample_tx.send(event) {
            Ok(num_receivers) => {
                trace!("published sample event to {num_receivers} receivers");
            }
            Err(_) => {
                trace!("no receivers for sample event (this is OK)");
            }
        }

        if starved {
            anyhow::bail!("every snapshot fetch failed");
        }
        Ok(())
    }
}

/// Handle for controlling an AgentActor
///
/// This handle provides a typed API for sending commands to the actor.
/// It can be cloned and shared across threads.
#[derive(Clone)]
pub struct AgentHandle {
    /// Command sender
    sender: mpsc::Sender<AgentCommand>,

    /// Agent identity (the configured name)
    pub agent_id: String,
}

impl AgentHandle {
    /// Spawn an agent for a RabbitMQ cluster
    ///
    /// Construction validates the configuration; a broken config fails
    /// here, before the actor exists or any network call is made.
    pub fn spawn_broker(
        config: &BrokerConfig,
        sample_tx: broadcast::Sender<SampleEvent>,
    ) -> ConfigResult<Self> {
        let poller = AgentPoller::Broker(BrokerPoller::new(config)?);
        Ok(Self::spawn(poller, config.interval, sample_tx))
    }

    /// Spawn an agent for a Neuron ESB instance
    pub fn spawn_esb(
        config: &EsbConfig,
        sample_tx: broadcast::Sender<SampleEvent>,
    ) -> ConfigResult<Self> {
        let poller = AgentPoller::Esb(EsbPoller::new(config)?);
        Ok(Self::spawn(poller, config.interval, sample_tx))
    }

    /// Spawn the actor for an already-constructed poller
    pub fn spawn(
        poller: AgentPoller,
        interval_secs: u64,
        sample_tx: broadcast::Sender<SampleEvent>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let agent_id = poller.name().to_string();

        let actor = AgentActor::new(poller, cmd_rx, sample_tx, interval_secs);
        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            agent_id,
        }
    }

    /// Trigger an immediate poll cycle
    ///
    /// This bypasses the interval timer and polls immediately.
    /// Useful for testing and manual refresh operations.
    pub async fn poll_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(AgentCommand::PollNow { respond_to: tx })
            .await
            .context("failed to send PollNow command")?;

        rx.await.context("failed to receive response")??;
        Ok(())
    }

    /// Update the polling interval
    pub async fn update_interval(&self, interval_secs: u64) -> Result<()> {
        self.sender
            .send(AgentCommand::UpdateInterval { interval_secs })
            .await
            .context("failed to send UpdateInterval command")?;
        Ok(())
    }

    /// Gracefully shut down the agent
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(AgentCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }
}
