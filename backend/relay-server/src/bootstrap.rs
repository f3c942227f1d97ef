use crate::error::Result as ServerErrorResult;
use crate::timed;

use relay_config::{Config, GraphConfig, QueueConfig};
use relay_graph::{BoltGraph, GraphClient, run_setup};
use relay_queue::{Emitter, KafkaSource, MessageSource, RelayLoop};
use relay_ws::ShutdownGuard;

use std::sync::Arc;

use log::info;
use tokio::task::JoinHandle;

/// Everything the one-time startup sequence produced
pub struct AppContext {
    /// Graph handle, read-only once setup has run
    pub graph: Arc<dyn GraphClient>,
    pub config: Arc<Config>,
}

/// Connect to the graph database. Failure is fatal.
pub async fn connect_graph(config: &GraphConfig) -> ServerErrorResult<Arc<dyn GraphClient>> {
    let graph = timed("graph connect", BoltGraph::connect(config)).await?;
    Ok(Arc::new(graph))
}

/// Run the configured setup statements against `graph` and build the context.
/// The first failing statement aborts startup.
pub async fn prepare(graph: Arc<dyn GraphClient>, config: Config) -> ServerErrorResult<AppContext> {
    timed(
        "graph setup",
        run_setup(graph.as_ref(), &config.graph.setup_statements),
    )
    .await?;

    Ok(AppContext {
        graph,
        config: Arc::new(config),
    })
}

/// Connect to the queue and resolve the topic's partitions. Failure is fatal.
pub async fn connect_queue(config: &QueueConfig) -> ServerErrorResult<KafkaSource> {
    let source = timed("queue connect", KafkaSource::connect(config)).await?;
    Ok(source)
}

/// Start the relay loop as its own task
pub fn spawn_relay<S, E>(
    source: S,
    emitter: E,
    config: &Config,
    shutdown: ShutdownGuard,
) -> JoinHandle<()>
where
    S: MessageSource + 'static,
    E: Emitter + 'static,
{
    let relay = RelayLoop::new(
        source,
        emitter,
        config.broadcast.channel.clone(),
        config.queue.idle_interval(),
    );

    info!(
        "Spawning relay loop ({} -> '{}')",
        config.queue.topic, config.broadcast.channel
    );
    tokio::spawn(relay.run(shutdown))
}
