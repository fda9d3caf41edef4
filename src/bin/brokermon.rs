use broker_monitoring::{
    actors::{agent::AgentHandle, messages::SampleEvent},
    config::{Config, read_config_file},
    error::ConfigResult,
    sink::{TracingSink, run_sink},
};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{debug, error, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: String,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("broker_monitoring", LevelFilter::TRACE),
        ("brokermon", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = read_config_file(&args.file)?;

    let (sample_tx, sample_rx) = broadcast::channel::<SampleEvent>(64);

    // a single broken agent config aborts startup, reported once
    let handles = dispatch_agents(&config, &sample_tx)?;
    if handles.is_empty() {
        anyhow::bail!("no agents configured");
    }
    debug!("monitoring {} targets", handles.len());

    let sink = tokio::spawn(run_sink(sample_rx, TracingSink));

    tokio::signal::ctrl_c().await?;
    debug!("shutting down");

    for handle in &handles {
        if let Err(e) = handle.shutdown().await {
            error!("{}: {e:#}", handle.agent_id);
        }
    }
    drop(sample_tx);
    let _ = sink.await;

    Ok(())
}

fn dispatch_agents(
    config: &Config,
    sample_tx: &broadcast::Sender<SampleEvent>,
) -> ConfigResult<Vec<AgentHandle>> {
    let mut handles = vec![];

    if let Some(brokers) = &config.brokers {
        for broker in brokers {
            handles.push(AgentHandle::spawn_broker(broker, sample_tx.clone())?);
        }
    }

    if let Some(esbs) = &config.esbs {
        for esb in esbs {
            handles.push(AgentHandle::spawn_esb(esb, sample_tx.clone())?);
        }
    }

    Ok(handles)
}
