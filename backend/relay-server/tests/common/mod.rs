#![allow(dead_code)]

//! Test infrastructure for relay-server tests

use relay_graph::{GraphClient, GraphError, Result as GraphErrorResult};
use relay_server::build_router;
use relay_ws::{
    AppState, Broadcaster, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::panic::Location;
use std::sync::Mutex;

use async_trait::async_trait;
use axum_test::TestServer;
use error_location::ErrorLocation;

/// Create AppState for testing
pub fn create_test_app_state() -> AppState {
    let metrics = Metrics::new();

    AppState {
        broadcaster: Broadcaster::new(&relay_config::BroadcastConfig::default(), metrics.clone()),
        registry: ConnectionRegistry::new(ConnectionLimits { max_total: 10000 }),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    }
}

/// Full router over HTTP transport (needed for WebSocket upgrades)
pub fn create_test_server(app_state: AppState) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(app_state))
        .expect("Failed to create test server")
}

/// Graph double: records statements, fails the one named in `fail_on`
#[derive(Default)]
pub struct FakeGraph {
    pub executed: Mutex<Vec<String>>,
    pub fail_on: Option<String>,
}

#[async_trait]
impl GraphClient for FakeGraph {
    async fn execute(&self, statement: &str) -> GraphErrorResult<()> {
        if self.fail_on.as_deref() == Some(statement) {
            return Err(GraphError::Statement {
                statement: statement.to_string(),
                message: "unknown procedure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.executed.lock().unwrap().push(statement.to_string());
        Ok(())
    }
}

/// Hands out the queued batches, then stays empty
pub struct QueuedSource {
    batches: std::collections::VecDeque<relay_queue::PollBatch>,
}

impl QueuedSource {
    pub fn new(batches: impl IntoIterator<Item = relay_queue::PollBatch>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }
}

#[async_trait]
impl relay_queue::MessageSource for QueuedSource {
    async fn poll(&mut self) -> relay_queue::Result<relay_queue::PollBatch> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

/// Subscriptions happen after the upgrade completes; wait until visible
pub async fn wait_for_subscribers(broadcaster: &Broadcaster, expected: usize) {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
    while broadcaster.subscriber_count() < expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {expected} subscribers"
        );
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
}
