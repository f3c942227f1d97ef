use crate::{BroadcastMessage, Metrics, Result as WsErrorResult};

use relay_config::BroadcastConfig;

use serde_json::Value;
use tokio::sync::broadcast;

/// Fan-out of relayed events to every connected client.
///
/// Each WebSocket connection holds one receiver. Slow receivers lag and
/// lose the oldest messages instead of blocking the sender.
#[derive(Clone)]
pub struct Broadcaster {
    sender: broadcast::Sender<BroadcastMessage>,
    metrics: Metrics,
}

impl Broadcaster {
    pub fn new(config: &BroadcastConfig, metrics: Metrics) -> Self {
        let (sender, _) = broadcast::channel(config.capacity);
        log::info!(
            "Created broadcast channel (capacity {})",
            config.capacity
        );

        Self { sender, metrics }
    }

    /// Subscribe a new client
    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastMessage> {
        let receiver = self.sender.subscribe();

        log::debug!(
            "Client subscribed to broadcast ({} total subscribers)",
            self.sender.receiver_count()
        );

        receiver
    }

    /// Broadcast a prepared message, returning how many subscribers it reached
    pub fn broadcast(&self, message: BroadcastMessage) -> usize {
        let event = message.event.clone();

        let receiver_count = match self.sender.send(message) {
            Ok(receiver_count) => {
                log::debug!(
                    "Broadcast '{}' event ({} receivers)",
                    event,
                    receiver_count
                );
                receiver_count
            }
            Err(_) => {
                // Nobody connected right now; the message is dropped.
                log::debug!("Broadcast '{}' event had no active receivers", event);
                0
            }
        };

        self.metrics.broadcast_published(&event, receiver_count);
        receiver_count
    }

    /// Serialize `payload` under `event` and broadcast it
    pub fn emit(&self, event: &str, payload: &Value) -> WsErrorResult<usize> {
        let message = BroadcastMessage::new(event, payload)?;
        Ok(self.broadcast(message))
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
