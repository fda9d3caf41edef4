use tracing::trace;

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration: the set of monitored targets.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// RabbitMQ clusters to poll via the management API
    pub brokers: Option<Vec<BrokerConfig>>,

    /// Neuron ESB instances to poll for endpoint health
    pub esbs: Option<Vec<EsbConfig>>,
}

/// Identity and connection parameters for one RabbitMQ cluster.
///
/// Immutable after construction; validated eagerly by the agent that is
/// bound to it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BrokerConfig {
    pub name: String,
    pub host: String,
    #[serde(default = "default_broker_port")]
    pub port: u16,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl BrokerConfig {
    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> ConfigResult<()> {
        require(&self.name, &self.name, "name")?;
        require(&self.name, &self.host, "host")?;
        require(&self.name, &self.scheme, "scheme")?;
        require(&self.name, &self.vhost, "vhost")?;
        require(&self.name, &self.username, "username")?;
        require(&self.name, &self.password, "password")?;
        Ok(())
    }
}

/// Identity and connection parameters for one Neuron ESB instance.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EsbConfig {
    pub name: String,
    pub host: String,
    #[serde(default = "default_esb_port")]
    pub port: u16,
    #[serde(default)]
    pub instance: String,
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl EsbConfig {
    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> ConfigResult<()> {
        require(&self.name, &self.name, "name")?;
        require(&self.name, &self.host, "host")?;
        require(&self.name, &self.instance, "instance")?;
        Ok(())
    }
}

fn require(agent: &str, value: &str, field: &'static str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::MissingField {
            agent: agent.to_string(),
            field,
        });
    }
    Ok(())
}

fn default_broker_port() -> u16 {
    15672
}

fn default_esb_port() -> u16 {
    51002
}

fn default_scheme() -> String {
    String::from("http")
}

fn default_vhost() -> String {
    String::from("/")
}

fn default_interval() -> u64 {
    15
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
