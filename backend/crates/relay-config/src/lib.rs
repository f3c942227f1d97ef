mod broadcast_config;
mod config;
mod error;
mod graph_config;
mod log_level;
mod logging_config;
mod queue_config;
mod server_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use broadcast_config::BroadcastConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use graph_config::GraphConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use queue_config::{QueueConfig, StartOffset};
pub use server_config::ServerConfig;
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".relay";
const CONFIG_FILENAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 10000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100000;

// Queue
const DEFAULT_QUEUE_HOST: &str = "kafka";
const DEFAULT_QUEUE_PORT: u16 = 9092;
const DEFAULT_QUEUE_TOPIC: &str = "created_objects";
const DEFAULT_IDLE_INTERVAL_MS: u64 = 1000;
const MIN_IDLE_INTERVAL_MS: u64 = 1;
const MAX_IDLE_INTERVAL_MS: u64 = 60_000;
const DEFAULT_FETCH_MAX_WAIT_MS: i32 = 500;
const MAX_FETCH_MAX_WAIT_MS: i32 = 30_000;
const MIN_FETCH_MAX_BYTES: i32 = 1024;
const DEFAULT_FETCH_MAX_BYTES: i32 = 1024 * 1024;
const MAX_FETCH_MAX_BYTES: i32 = 64 * 1024 * 1024;

// Graph
const DEFAULT_GRAPH_HOST: &str = "memgraph-mage";
const DEFAULT_GRAPH_PORT: u16 = 7687;

// Broadcast
const DEFAULT_BROADCAST_CHANNEL: &str = "consumer";
const DEFAULT_BROADCAST_CAPACITY: usize = 1000;
const MIN_BROADCAST_CAPACITY: usize = 1;
const MAX_BROADCAST_CAPACITY: usize = 100_000;

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
