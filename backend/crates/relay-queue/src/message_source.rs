use crate::{PollBatch, Result as QueueErrorResult};

use async_trait::async_trait;

/// A pull-based source of queue messages.
#[async_trait]
pub trait MessageSource: Send {
    /// Fetch whatever is available right now. An empty batch means
    /// nothing arrived within the source's own wait bound.
    async fn poll(&mut self) -> QueueErrorResult<PollBatch>;
}
