//! Shared helpers for integration tests

use std::time::Duration;

use broker_monitoring::{
    actors::messages::SampleEvent,
    config::{BrokerConfig, EsbConfig},
};
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn overview_body() -> serde_json::Value {
    json!({
        "queue_totals": {"messages": 10, "messages_ready": 7, "messages_unacknowledged": 3},
        "object_totals": {"queues": 2, "exchanges": 1},
        "message_stats": {"publish": 100, "ack": 90, "deliver_get": 95, "confirm": 80, "redeliver": 5, "get_no_ack": 2}
    })
}

pub fn nodes_body() -> serde_json::Value {
    json!([{
        "name": "rabbit@host1",
        "mem_used": 512, "mem_limit": 1024,
        "disk_free_limit": 50, "disk_free": 200,
        "proc_used": 100, "proc_total": 400,
        "fd_used": 30, "fd_total": 120,
        "sockets_used": 10, "sockets_total": 40,
        "running": true
    }])
}

pub fn queues_body() -> serde_json::Value {
    json!([{
        "vhost": "/",
        "name": "orders",
        "messages": 5,
        "messages_ready": 3,
        "messages_unacknowledged": 2,
        "consumers": 1
    }])
}

pub fn endpoint_health_body() -> serde_json::Value {
    json!([
        {"Name": "Orders", "Heartbeats": 3, "Errors": 1, "Warnings": 0, "MessageRate": 1.5, "MessagesProcessed": 100},
        {"Name": "Billing", "Heartbeats": 2, "Errors": 0, "Warnings": 4, "MessageRate": 0.5, "MessagesProcessed": 50}
    ])
}

pub async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount all three broker endpoints with the canonical bodies.
pub async fn mount_broker(server: &MockServer) {
    mount_json(server, "/api/overview", overview_body()).await;
    mount_json(server, "/api/nodes", nodes_body()).await;
    mount_json(server, "/api/queues", queues_body()).await;
}

pub fn broker_config_for(server: &MockServer) -> BrokerConfig {
    let url = Url::parse(&server.uri()).unwrap();
    BrokerConfig {
        name: String::from("test-broker"),
        host: url.host_str().unwrap().to_string(),
        port: url.port().unwrap(),
        scheme: String::from("http"),
        vhost: String::from("/"),
        username: String::from("guest"),
        password: String::from("guest"),
        // long interval so only explicit PollNow commands (and the initial
        // tick) drive cycles during a test
        interval: 600,
    }
}

pub fn esb_config_for(server: &MockServer) -> EsbConfig {
    let url = Url::parse(&server.uri()).unwrap();
    EsbConfig {
        name: String::from("test-esb"),
        host: url.host_str().unwrap().to_string(),
        port: url.port().unwrap(),
        instance: String::from("DEFAULT"),
        interval: 600,
    }
}

/// Receive the next published event, failing the test after a timeout.
pub async fn next_event(rx: &mut broadcast::Receiver<SampleEvent>) -> SampleEvent {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a sample event")
        .expect("broadcast channel closed")
}

pub fn sample_value(event: &SampleEvent, name: &str) -> f64 {
    event
        .samples
        .iter()
        .find(|sample| sample.name == name)
        .unwrap_or_else(|| panic!("no sample named {name}"))
        .value
}

pub fn has_sample(event: &SampleEvent, name: &str) -> bool {
    event.samples.iter().any(|sample| sample.name == name)
}
