use crate::{
    Broadcaster, ConnectionConfig, ConnectionId, ConnectionRegistry, Metrics, ShutdownCoordinator,
    WebSocketConnection,
};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, error, warn};

/// Shared application state for the WebSocket endpoint
#[derive(Clone)]
pub struct AppState {
    pub broadcaster: Broadcaster,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// WebSocket upgrade handler. Unauthenticated; any origin may connect.
pub async fn handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    debug!("WebSocket upgrade request");

    // Register connection (enforces connection limits)
    let connection_id = state.registry.register().await.map_err(|e| {
        error!("Failed to register connection: {}", e);
        state.metrics.connection_rejected();
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let registry = state.registry.clone();

    Ok(ws
        .on_failed_upgrade(move |e| {
            warn!("WebSocket upgrade failed for {connection_id}: {e}");
            tokio::spawn(async move { registry.unregister(connection_id).await });
        })
        .on_upgrade(move |socket| handle_socket(socket, connection_id, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        state.config,
        state.metrics.clone(),
        state.broadcaster.clone(),
    );

    let result = connection.handle(socket, shutdown_guard).await;

    state.registry.unregister(connection_id).await;

    if let Err(e) = result {
        error!("Connection {connection_id} error: {e}");
    }
}
