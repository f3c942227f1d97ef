use crate::Result as GraphErrorResult;

use async_trait::async_trait;

/// The operations the service needs from a graph database.
///
/// Shared read-only after startup, hence `Send + Sync` behind an `Arc`.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Execute a single statement, discarding any rows it returns
    async fn execute(&self, statement: &str) -> GraphErrorResult<()>;
}
