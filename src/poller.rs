//! Poll-cycle orchestration, one cycle at a time per agent
//!
//! A cycle fetches every snapshot kind its target exposes, maps each
//! successful fetch into samples, and records a failure for each fetch
//! that did not succeed. Partial telemetry beats none: a failing snapshot
//! kind never suppresses the samples of the kinds that worked.
//!
//! `run_cycle` takes `&mut self`, so cycles for one agent can never
//! overlap; the actor driving a poller runs them strictly sequentially.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::{
    MetricSample,
    client::ApiClient,
    config::{BrokerConfig, EsbConfig},
    error::ConfigResult,
    mappers,
    rate::CounterRates,
    snapshot::SnapshotKind,
};

/// Everything one cycle produced: the samples of every snapshot kind that
/// could be fetched, plus one failure record per kind that could not.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub samples: Vec<MetricSample>,
    pub failures: Vec<FetchFailure>,
}

/// A snapshot kind that could not be fetched this cycle.
#[derive(Debug)]
pub struct FetchFailure {
    pub kind: SnapshotKind,
    pub error: anyhow::Error,
}

impl CycleOutcome {
    fn absorb(
        &mut self,
        kind: SnapshotKind,
        fetched: anyhow::Result<Value>,
        rates: &mut CounterRates,
        now: Instant,
    ) {
        match fetched {
            Ok(document) => {
                self.samples
                    .extend(mappers::map_snapshot(kind, &document, rates, now));
            }
            Err(error) => {
                error!("failed to fetch {kind} snapshot: {error:#}");
                self.failures.push(FetchFailure { kind, error });
            }
        }
    }
}

/// Poller for one RabbitMQ cluster.
pub struct BrokerPoller {
    name: String,
    client: ApiClient,
    rates: CounterRates,
}

impl BrokerPoller {
    /// Validates the configuration before anything touches the network.
    pub fn new(config: &BrokerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            client: ApiClient::for_broker(config),
            rates: CounterRates::new(),
        })
    }

    #[instrument(skip(self), fields(agent = %self.name))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        debug!("starting poll cycle");

        // independent reads, issued concurrently; each may fail on its own
        let (overview, nodes, queues) = tokio::join!(
            self.client.get_json("/api/overview"),
            self.client.get_json("/api/nodes"),
            self.client.get_json("/api/queues"),
        );

        // one reading time for every counter in this cycle
        let now = Instant::now();

        let mut outcome = CycleOutcome::default();
        outcome.absorb(SnapshotKind::Overview, overview, &mut self.rates, now);
        outcome.absorb(SnapshotKind::Nodes, nodes, &mut self.rates, now);
        outcome.absorb(SnapshotKind::Queues, queues, &mut self.rates, now);

        debug!(
            "cycle finished with {} samples, {} failed fetches",
            outcome.samples.len(),
            outcome.failures.len()
        );
        outcome
    }
}

/// Poller for one Neuron ESB instance.
pub struct EsbPoller {
    name: String,
    instance: String,
    client: ApiClient,
    rates: CounterRates,
}

impl EsbPoller {
    /// Validates the configuration before anything touches the network.
    pub fn new(config: &EsbConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            instance: config.instance.clone(),
            client: ApiClient::for_esb(config),
            rates: CounterRates::new(),
        })
    }

    #[instrument(skip(self), fields(agent = %self.name))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        debug!("starting poll cycle");

        let path = format!("/neuronesb/api/v1/endpointhealth/{}", self.instance);
        let fetched = self.client.get_json(&path).await;
        let now = Instant::now();

        let mut outcome = CycleOutcome::default();
        outcome.absorb(SnapshotKind::EndpointHealth, fetched, &mut self.rates, now);
        outcome
    }
}

/// Tagged dispatch over the supported management APIs.
///
/// An agent is bound to exactly one target kind for its whole lifetime;
/// the variant carries the per-target rate state.
pub enum AgentPoller {
    Broker(BrokerPoller),
    Esb(EsbPoller),
}

impl AgentPoller {
    pub fn name(&self) -> &str {
        match self {
            AgentPoller::Broker(poller) => &poller.name,
            AgentPoller::Esb(poller) => &poller.name,
        }
    }

    /// Version label attached to everything this agent reports.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self {
            AgentPoller::Broker(poller) => poller.run_cycle().await,
            AgentPoller::Esb(poller) => poller.run_cycle().await,
        }
    }
}
