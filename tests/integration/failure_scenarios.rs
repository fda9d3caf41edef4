//! Failure isolation tests
//!
//! A failing snapshot kind must only cost its own samples; a broken
//! configuration must fail before anything touches the network.

use broker_monitoring::actors::agent::AgentHandle;
use tokio::sync::broadcast;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::*;

#[tokio::test]
async fn queue_fetch_failure_keeps_overview_and_node_samples() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "/api/overview", overview_body()).await;
    mount_json(&mock_server, "/api/nodes", nodes_body()).await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (sample_tx, mut sample_rx) = broadcast::channel(16);
    let handle = AgentHandle::spawn_broker(&broker_config_for(&mock_server), sample_tx).unwrap();

    // a partially failed cycle still counts as success
    handle.poll_now().await.unwrap();
    let event = next_event(&mut sample_rx).await;

    assert!(has_sample(&event, "Queues/Queued"));
    assert!(has_sample(&event, "Node/MemoryUsage/rabbit@host1"));
    assert!(!has_sample(&event, "Queues/Root/orders/Messages/Total"));

    assert_eq!(event.failures.len(), 1);
    assert!(event.failures[0].starts_with("queues"), "{:?}", event.failures);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn unparseable_snapshot_is_isolated_to_its_kind() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&mock_server)
        .await;
    mount_json(&mock_server, "/api/nodes", nodes_body()).await;
    mount_json(&mock_server, "/api/queues", queues_body()).await;

    let (sample_tx, mut sample_rx) = broadcast::channel(16);
    let handle = AgentHandle::spawn_broker(&broker_config_for(&mock_server), sample_tx).unwrap();

    handle.poll_now().await.unwrap();
    let event = next_event(&mut sample_rx).await;

    assert!(!has_sample(&event, "Queues/Queued"));
    assert!(has_sample(&event, "Node/Running/rabbit@host1"));
    assert!(has_sample(&event, "Queues/Root/orders/Consumers"));
    assert_eq!(event.failures.len(), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn cycle_with_no_surviving_snapshot_is_an_error() {
    // no routes mounted: every fetch gets a 404
    let mock_server = MockServer::start().await;

    let (sample_tx, mut sample_rx) = broadcast::channel(16);
    let handle = AgentHandle::spawn_broker(&broker_config_for(&mock_server), sample_tx).unwrap();

    let result = handle.poll_now().await;
    assert!(result.is_err());

    // the starved cycle is still published, with its failure list
    let event = next_event(&mut sample_rx).await;
    assert!(event.samples.is_empty());
    assert_eq!(event.failures.len(), 3);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn broken_config_fails_before_any_network_call() {
    let mock_server = MockServer::start().await;
    mount_broker(&mock_server).await;

    let mut config = broker_config_for(&mock_server);
    config.username = String::new();

    let (sample_tx, _sample_rx) = broadcast::channel(16);
    assert!(AgentHandle::spawn_broker(&config, sample_tx).is_err());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no request may precede validation");
}

#[tokio::test]
async fn esb_fetch_failure_publishes_empty_cycle() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neuronesb/api/v1/endpointhealth/DEFAULT"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (sample_tx, mut sample_rx) = broadcast::channel(16);
    let handle = AgentHandle::spawn_esb(&esb_config_for(&mock_server), sample_tx).unwrap();

    assert!(handle.poll_now().await.is_err());

    let event = next_event(&mut sample_rx).await;
    assert!(event.samples.is_empty());
    assert_eq!(event.failures.len(), 1);
    assert!(event.failures[0].starts_with("endpoint health"));

    handle.shutdown().await.unwrap();
}
