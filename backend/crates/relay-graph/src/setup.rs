use crate::{GraphClient, Result as GraphErrorResult};

use log::info;

/// Run the one-time setup statements in order.
///
/// Stops at the first failing statement; nothing after it is executed.
pub async fn run_setup(client: &dyn GraphClient, statements: &[String]) -> GraphErrorResult<()> {
    if statements.is_empty() {
        info!("No graph setup statements configured");
        return Ok(());
    }

    info!("Running {} graph setup statements", statements.len());

    for (index, statement) in statements.iter().enumerate() {
        client.execute(statement).await?;
        info!("  [{}/{}] {}", index + 1, statements.len(), statement);
    }

    info!("Graph setup complete");
    Ok(())
}
