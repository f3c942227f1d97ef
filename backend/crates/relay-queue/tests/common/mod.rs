#![allow(dead_code)]

use relay_config::BroadcastConfig;
use relay_queue::{MessageSource, PollBatch, Result as QueueErrorResult};
use relay_ws::{
    AppState, Broadcaster, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::{TestServer, TestWebSocket};

/// Serves `/ws` backed by a fresh broadcaster
pub struct RelayTestServer {
    pub server: TestServer,
    pub app_state: AppState,
}

pub fn create_test_server() -> RelayTestServer {
    let metrics = Metrics::default();
    let app_state = AppState {
        broadcaster: Broadcaster::new(&BroadcastConfig::default(), metrics.clone()),
        registry: ConnectionRegistry::new(ConnectionLimits::default()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    };

    let router = Router::new()
        .route("/ws", get(relay_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(router)
        .expect("Failed to create test server");

    RelayTestServer { server, app_state }
}

pub async fn connect(server: &TestServer) -> TestWebSocket {
    server.get_websocket("/ws").await.into_websocket().await
}

pub async fn wait_for_subscribers(broadcaster: &Broadcaster, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while broadcaster.subscriber_count() < expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {expected} subscribers"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Hands out queued batches, then stays empty
pub struct QueuedSource {
    batches: VecDeque<PollBatch>,
}

impl QueuedSource {
    pub fn new(batches: impl IntoIterator<Item = PollBatch>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }
}

#[async_trait]
impl MessageSource for QueuedSource {
    async fn poll(&mut self) -> QueueErrorResult<PollBatch> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}
