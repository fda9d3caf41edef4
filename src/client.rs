//! Thin HTTP client over the polled management APIs

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::trace;

use crate::config::{BrokerConfig, EsbConfig};

/// Per-request timeout; one slow endpoint must not stall the whole cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one management API base URL.
///
/// The inner `reqwest::Client` is built once and reused across requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl ApiClient {
    pub fn new(base_url: String, credentials: Option<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            credentials,
        }
    }

    /// Client for the RabbitMQ management API, with basic credentials.
    pub fn for_broker(config: &BrokerConfig) -> Self {
        Self::new(
            format!("{}://{}:{}", config.scheme, config.host, config.port),
            Some((config.username.clone(), config.password.clone())),
        )
    }

    /// Client for the Neuron ESB management API.
    pub fn for_esb(config: &EsbConfig) -> Self {
        Self::new(format!("http://{}:{}", config.host, config.port), None)
    }

    /// Fetch one snapshot document.
    ///
    /// A non-success status, a transport error, or an unparseable body all
    /// surface as an error for this one snapshot; the caller decides how
    /// much of the cycle survives.
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        trace!("requesting {url}");

        let mut request = self.client.get(&url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.context("failed to send HTTP request")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("failed to read response body")?;

        serde_json::from_str(&body).context("failed to parse snapshot JSON")
    }
}
