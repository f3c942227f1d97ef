use relay_config::WebSocketConfig;

/// Per-connection settings handed to every WebSocketConnection
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outgoing frames buffered per client before sends wait
    pub send_buffer_size: usize,
    pub heartbeat_interval_secs: u64,
    /// Close the connection when the client is silent this long
    pub heartbeat_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from(&WebSocketConfig::default())
    }
}

impl From<&WebSocketConfig> for ConnectionConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval_secs: config.heartbeat_interval_secs,
            heartbeat_timeout_secs: config.heartbeat_timeout_secs,
        }
    }
}
