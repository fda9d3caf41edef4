//! Concurrent agents and command handling
//!
//! Distinct agents share nothing and poll in parallel; cycles for one
//! agent stay strictly sequential inside its actor.

use broker_monitoring::actors::agent::AgentHandle;
use serde_json::json;
use tokio::sync::broadcast;
use wiremock::MockServer;

use super::helpers::*;

#[tokio::test]
async fn agents_poll_independently() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;

    mount_json(&server_a, "/api/overview", json!({"queue_totals": {"messages": 1}})).await;
    mount_json(&server_a, "/api/nodes", json!([{"name": "rabbit@a", "running": true}])).await;
    mount_json(&server_a, "/api/queues", json!([])).await;

    mount_json(&server_b, "/api/overview", json!({"queue_totals": {"messages": 2}})).await;
    mount_json(&server_b, "/api/nodes", json!([{"name": "rabbit@b", "running": true}])).await;
    mount_json(&server_b, "/api/queues", json!([])).await;

    let mut config_a = broker_config_for(&server_a);
    config_a.name = String::from("broker-a");
    let mut config_b = broker_config_for(&server_b);
    config_b.name = String::from("broker-b");

    let (sample_tx, mut sample_rx) = broadcast::channel(32);
    let handle_a = AgentHandle::spawn_broker(&config_a, sample_tx.clone()).unwrap();
    let handle_b = AgentHandle::spawn_broker(&config_b, sample_tx).unwrap();

    let (poll_a, poll_b) = tokio::join!(handle_a.poll_now(), handle_b.poll_now());
    poll_a.unwrap();
    poll_b.unwrap();

    // collect events until both agents have reported
    let mut seen_a = false;
    let mut seen_b = false;
    while !(seen_a && seen_b) {
        let event = next_event(&mut sample_rx).await;
        match event.agent_id.as_str() {
            "broker-a" => {
                assert_eq!(sample_value(&event, "Queues/Queued"), 1.0);
                assert!(has_sample(&event, "Node/Running/rabbit@a"));
                seen_a = true;
            }
            "broker-b" => {
                assert_eq!(sample_value(&event, "Queues/Queued"), 2.0);
                assert!(has_sample(&event, "Node/Running/rabbit@b"));
                seen_b = true;
            }
            other => panic!("unexpected agent id {other}"),
        }
    }

    handle_a.shutdown().await.unwrap();
    handle_b.shutdown().await.unwrap();
}

#[tokio::test]
async fn rapid_poll_commands_are_serialized_not_dropped() {
    let mock_server = MockServer::start().await;
    mount_broker(&mock_server).await;

    let (sample_tx, _sample_rx) = broadcast::channel(64);
    let handle = AgentHandle::spawn_broker(&broker_config_for(&mock_server), sample_tx).unwrap();

    let mut tasks = vec![];
    for _ in 0..5 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move { handle.poll_now().await }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    handle.shutdown().await.unwrap();
}
