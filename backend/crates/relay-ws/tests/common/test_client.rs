#![allow(dead_code)]

use axum_test::{TestServer, TestWebSocket};
use serde_json::Value;

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the WebSocket endpoint
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;

        Self { ws }
    }

    /// Receive the next frame parsed as JSON
    pub async fn receive_json(&mut self) -> Value {
        self.ws.receive_json::<Value>().await
    }

    /// Send text message (ignored by the server)
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect several clients (helper for broadcast tests)
pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server).await);
    }
    clients
}
