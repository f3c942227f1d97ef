use crate::{
    BroadcastConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, GraphConfig, LoggingConfig, QueueConfig, ServerConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub queue: QueueConfig,
    pub graph: GraphConfig,
    pub broadcast: BroadcastConfig,
    pub websocket: WebSocketConfig,
    pub logging: LoggingConfig,
    /// Environment overrides that could not be parsed, as `NAME=value`
    #[serde(skip)]
    pub rejected_env: Vec<String>,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RELAY_CONFIG_DIR env var, else use ./.relay/
    /// 2. Load config.toml from that directory if it exists, else use defaults
    /// 3. Apply environment variable overrides
    ///
    /// The directory is not created; a missing file simply means defaults.
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RELAY_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.rejected_env.is_empty() {
            return Err(ConfigError::config(format!(
                "invalid environment overrides: {}",
                self.rejected_env.join(", ")
            )));
        }

        self.server.validate()?;
        self.queue.validate()?;
        self.graph.validate()?;
        self.broadcast.validate()?;
        self.websocket.validate()?;

        if let Some(ref file) = self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections, debug: {})",
            self.server.host, self.server.port, self.server.max_connections, self.server.debug
        );
        info!(
            "  queue: {} topic={} start={} idle={}ms",
            self.queue.bootstrap_server(),
            self.queue.topic,
            self.queue.start_offset,
            self.queue.idle_interval_ms
        );
        info!(
            "  graph: {} ({} setup statements, auth: {})",
            self.graph.uri(),
            self.graph.setup_statements.len(),
            if self.graph.user.is_empty() {
                "none"
            } else {
                "basic"
            }
        );
        info!(
            "  broadcast: channel={} capacity={}",
            self.broadcast.channel, self.broadcast.capacity
        );
        info!(
            "  websocket: buffer={}, heartbeat={}s/{}s",
            self.websocket.send_buffer_size,
            self.websocket.heartbeat_interval_secs,
            self.websocket.heartbeat_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        let mut rejected = Vec::new();

        // Server
        Self::apply_env_string("RELAY_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RELAY_SERVER_PORT", &mut self.server.port, &mut rejected);
        Self::apply_env_parse(
            "RELAY_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
            &mut rejected,
        );
        Self::apply_env_bool("RELAY_DEBUG", &mut self.server.debug);

        // Queue (deployment names)
        Self::apply_env_string("KAFKA_IP", &mut self.queue.host);
        Self::apply_env_parse("KAFKA_PORT", &mut self.queue.port, &mut rejected);
        Self::apply_env_string("KAFKA_TOPIC", &mut self.queue.topic);
        Self::apply_env_parse(
            "RELAY_QUEUE_IDLE_INTERVAL_MS",
            &mut self.queue.idle_interval_ms,
            &mut rejected,
        );
        Self::apply_env_parse(
            "RELAY_QUEUE_FETCH_MAX_WAIT_MS",
            &mut self.queue.fetch_max_wait_ms,
            &mut rejected,
        );
        Self::apply_env_parse(
            "RELAY_QUEUE_FETCH_MAX_BYTES",
            &mut self.queue.fetch_max_bytes,
            &mut rejected,
        );
        Self::apply_env_parse(
            "RELAY_QUEUE_START_OFFSET",
            &mut self.queue.start_offset,
            &mut rejected,
        );

        // Graph (deployment names)
        Self::apply_env_string("MEMGRAPH_IP", &mut self.graph.host);
        Self::apply_env_parse("MEMGRAPH_PORT", &mut self.graph.port, &mut rejected);
        Self::apply_env_string("RELAY_GRAPH_USER", &mut self.graph.user);
        Self::apply_env_string("RELAY_GRAPH_PASSWORD", &mut self.graph.password);

        // Broadcast
        Self::apply_env_string("RELAY_BROADCAST_CHANNEL", &mut self.broadcast.channel);
        Self::apply_env_parse(
            "RELAY_BROADCAST_CAPACITY",
            &mut self.broadcast.capacity,
            &mut rejected,
        );

        // WebSocket
        Self::apply_env_parse(
            "RELAY_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
            &mut rejected,
        );
        Self::apply_env_parse(
            "RELAY_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
            &mut rejected,
        );
        Self::apply_env_parse(
            "RELAY_WS_HEARTBEAT_TIMEOUT_SECS",
            &mut self.websocket.heartbeat_timeout_secs,
            &mut rejected,
        );

        // Logging
        Self::apply_env_parse("RELAY_LOG_LEVEL", &mut self.logging.level, &mut rejected);
        Self::apply_env_bool("RELAY_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RELAY_LOG_FILE", &mut self.logging.file);

        self.rejected_env = rejected;
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values leave `target` untouched and are recorded in
    /// `rejected` so that validate() can report them.
    fn apply_env_parse<T: FromStr>(
        var_name: &str,
        target: &mut T,
        rejected: &mut Vec<String>,
    ) {
        if let Ok(val) = std::env::var(var_name) {
            match val.parse() {
                Ok(parsed) => *target = parsed,
                Err(_) => rejected.push(format!("{var_name}={val}")),
            }
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
