use relay_config::Config;
use relay_server::{Cli, bootstrap, build_router, logger};
use relay_ws::{
    AppState, Broadcaster, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::error::Error;

use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load configuration; command-line flags win over file and environment
    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(
        logger::effective_level(*config.logging.level, config.server.debug),
        log_file_path,
        config.logging.colored,
    )?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Bootstrap: graph connection and setup, then the queue
    let graph = bootstrap::connect_graph(&config.graph).await?;
    let context = bootstrap::prepare(graph, config).await?;
    let config = context.config.clone();
    let source = bootstrap::connect_queue(&config.queue).await?;

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();
    let broadcaster = Broadcaster::new(&config.broadcast, metrics.clone());

    let app_state = AppState {
        broadcaster: broadcaster.clone(),
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.server.max_connections,
        }),
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig::from(&config.websocket),
    };

    let relay = bootstrap::spawn_relay(source, broadcaster, &config, shutdown.subscribe_guard());

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
        })
        .await?;

    if let Err(e) = relay.await {
        error!("Relay task ended abnormally: {e}");
    }

    info!("Graceful shutdown complete");
    Ok(())
}
