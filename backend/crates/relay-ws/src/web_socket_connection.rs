use crate::{
    BroadcastMessage, Broadcaster, ConnectionConfig, ConnectionId, Metrics,
    Result as WsErrorResult, ShutdownGuard, WsError,
};

use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, close_code};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior};

/// Manages a single push-only WebSocket connection
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    config: ConnectionConfig,
    metrics: Metrics,
    broadcaster: Broadcaster,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        config: ConnectionConfig,
        metrics: Metrics,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            connection_id,
            config,
            metrics,
            broadcaster,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        log::info!("WebSocket connection {} established", self.connection_id);
        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded channel for outgoing frames (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let mut broadcast_rx = self.broadcaster.subscribe();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let heartbeat_period = Duration::from_secs(self.config.heartbeat_interval_secs.max(1));
        let heartbeat_timeout = Duration::from_secs(self.config.heartbeat_timeout_secs);
        let mut heartbeat =
            tokio::time::interval_at(Instant::now() + heartbeat_period, heartbeat_period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) => {
                            log::info!("Received close frame from connection {}", self.connection_id);
                            break Ok(());
                        }
                        Some(Ok(msg)) => {
                            last_seen = Instant::now();
                            if let Err(e) = self.handle_client_message(msg, &tx).await {
                                break Err(e);
                            }
                        }
                        Some(Err(e)) => {
                            log::error!(
                                "WebSocket error on connection {}: {}",
                                self.connection_id,
                                e
                            );
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                broadcast_msg = broadcast_rx.recv() => {
                    match broadcast_msg {
                        Ok(msg) => {
                            if let Err(e) = self.forward_broadcast(msg, &tx).await {
                                log::debug!(
                                    "Stopping connection {}: {}",
                                    self.connection_id,
                                    e
                                );
                                break Ok(());
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            log::warn!(
                                "Connection {} lagged, missed {} messages",
                                self.connection_id,
                                missed
                            );
                            self.metrics.broadcast_lagged(missed);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            log::info!("Broadcast channel closed for connection {}", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > heartbeat_timeout {
                        log::warn!(
                            "Connection {} silent for {}s, closing",
                            self.connection_id,
                            heartbeat_timeout.as_secs()
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: heartbeat_timeout.as_secs(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    if tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break Ok(());
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    let _ = tx
                        .send(Message::Close(Some(CloseFrame {
                            code: close_code::AWAY,
                            reason: Utf8Bytes::from_static("server shutting down"),
                        })))
                        .await;
                    break Ok(());
                }
            }
        };

        // Closing the channel lets the send task flush and exit
        drop(tx);
        let _ = send_task.await;

        match &result {
            Ok(()) => self.metrics.connection_closed("normal"),
            Err(e) => {
                self.metrics.error_occurred(e.kind());
                self.metrics.connection_closed("error");
            }
        }

        log::info!("WebSocket connection {} closed", self.connection_id);

        result
    }

    /// Handle a frame from the client. The channel is push-only, so data
    /// frames are ignored; they still count as liveness.
    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => {
                log::debug!(
                    "Ignoring text frame from connection {}: {}",
                    self.connection_id,
                    text.as_str()
                );
                Ok(())
            }
            Message::Binary(data) => {
                log::debug!(
                    "Ignoring binary frame ({} bytes) from connection {}",
                    data.len(),
                    self.connection_id
                );
                Ok(())
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferClosed {
                        location: ErrorLocation::from(Location::caller()),
                    })
            }
            Message::Pong(_) | Message::Close(_) => Ok(()),
        }
    }

    /// Queue a broadcast frame for this client
    async fn forward_broadcast(
        &self,
        msg: BroadcastMessage,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        tx.send(Message::Text(msg.frame))
            .await
            .map_err(|_| WsError::SendBufferClosed {
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.metrics.message_sent(&msg.event);

        Ok(())
    }
}
