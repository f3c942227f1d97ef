use relay_ws::{Broadcaster, Result as WsErrorResult};

use async_trait::async_trait;
use serde_json::Value;

/// Push side of the relay: delivers a payload to every subscriber of `event`.
#[async_trait]
pub trait Emitter: Send + Sync {
    /// Returns the number of subscribers the payload reached
    async fn emit(&self, event: &str, payload: &Value) -> WsErrorResult<usize>;
}

#[async_trait]
impl Emitter for Broadcaster {
    async fn emit(&self, event: &str, payload: &Value) -> WsErrorResult<usize> {
        Broadcaster::emit(self, event, payload)
    }
}
