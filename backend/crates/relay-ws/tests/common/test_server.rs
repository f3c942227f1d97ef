#![allow(dead_code)]

use relay_config::BroadcastConfig;
use relay_ws::{
    AppState, Broadcaster, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub broadcast_capacity: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            broadcast_capacity: 64,
        }
    }
}

impl TestServerConfig {
    /// Create config with strict connection limits (for limit tests)
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let metrics = Metrics::default();
    let broadcast_config = BroadcastConfig {
        capacity: config.broadcast_capacity,
        ..BroadcastConfig::default()
    };

    let app_state = AppState {
        broadcaster: Broadcaster::new(&broadcast_config, metrics.clone()),
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.max_connections_total,
        }),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    };

    let router = Router::new()
        .route("/ws", get(relay_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}

/// Subscriptions happen on the server side after the upgrade completes;
/// wait until they are visible before broadcasting.
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

/// Wait until the registry has drained to `expected` connections.
pub async fn wait_for_connection_count(app_state: &AppState, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while app_state.registry.total_count().await != expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {expected} connections"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
