use crate::Result as WsErrorResult;

use axum::extract::ws::Utf8Bytes;
use serde::Serialize;
use serde_json::Value;

/// Wire shape of every server-initiated frame.
#[derive(Serialize)]
struct EventFrame<'a> {
    event: &'a str,
    payload: &'a Value,
}

/// A broadcast message that will be sent to clients.
///
/// The frame is serialized once here and shared by every subscriber.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// Event (channel) name, kept separately for metrics/logging
    pub event: String,
    /// `{"event": ..., "payload": ...}` text, ready to send on the wire
    pub frame: Utf8Bytes,
}

impl BroadcastMessage {
    pub fn new(event: &str, payload: &Value) -> WsErrorResult<Self> {
        let frame = serde_json::to_string(&EventFrame { event, payload })?;

        Ok(Self {
            event: event.to_string(),
            frame: Utf8Bytes::from(frame),
        })
    }
}
