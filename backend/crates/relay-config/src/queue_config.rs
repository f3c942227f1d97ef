use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FETCH_MAX_BYTES, DEFAULT_FETCH_MAX_WAIT_MS,
    DEFAULT_IDLE_INTERVAL_MS, DEFAULT_QUEUE_HOST, DEFAULT_QUEUE_PORT, DEFAULT_QUEUE_TOPIC,
    MAX_FETCH_MAX_BYTES, MAX_FETCH_MAX_WAIT_MS, MAX_IDLE_INTERVAL_MS, MIN_FETCH_MAX_BYTES,
    MIN_IDLE_INTERVAL_MS,
};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Where a partition starts reading when the relay connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOffset {
    /// Only messages produced after the relay connected
    #[default]
    Latest,
    /// Everything still retained by the broker
    Earliest,
}

impl FromStr for StartOffset {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(StartOffset::Latest),
            "earliest" => Ok(StartOffset::Earliest),
            other => Err(ConfigError::queue(format!(
                "queue.start_offset must be 'latest' or 'earliest', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for StartOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOffset::Latest => write!(f, "latest"),
            StartOffset::Earliest => write!(f, "earliest"),
        }
    }
}

/// Message queue (Kafka) connection and polling settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Bootstrap broker host
    pub host: String,
    /// Bootstrap broker port
    pub port: u16,
    pub topic: String,
    /// Sleep after a poll that returned nothing
    pub idle_interval_ms: u64,
    /// Upper bound the broker may hold a fetch open waiting for data
    pub fetch_max_wait_ms: i32,
    /// Upper bound on bytes returned per partition fetch
    pub fetch_max_bytes: i32,
    pub start_offset: StartOffset,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_QUEUE_HOST),
            port: DEFAULT_QUEUE_PORT,
            topic: String::from(DEFAULT_QUEUE_TOPIC),
            idle_interval_ms: DEFAULT_IDLE_INTERVAL_MS,
            fetch_max_wait_ms: DEFAULT_FETCH_MAX_WAIT_MS,
            fetch_max_bytes: DEFAULT_FETCH_MAX_BYTES,
            start_offset: StartOffset::default(),
        }
    }
}

impl QueueConfig {
    /// Bootstrap address in `host:port` form.
    pub fn bootstrap_server(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::queue("queue.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::queue("queue.port must not be 0"));
        }

        if self.topic.trim().is_empty() {
            return Err(ConfigError::queue("queue.topic must not be empty"));
        }

        if self.idle_interval_ms < MIN_IDLE_INTERVAL_MS
            || self.idle_interval_ms > MAX_IDLE_INTERVAL_MS
        {
            return Err(ConfigError::queue(format!(
                "queue.idle_interval_ms must be {}-{}, got {}",
                MIN_IDLE_INTERVAL_MS, MAX_IDLE_INTERVAL_MS, self.idle_interval_ms
            )));
        }

        if self.fetch_max_wait_ms < 0 || self.fetch_max_wait_ms > MAX_FETCH_MAX_WAIT_MS {
            return Err(ConfigError::queue(format!(
                "queue.fetch_max_wait_ms must be 0-{}, got {}",
                MAX_FETCH_MAX_WAIT_MS, self.fetch_max_wait_ms
            )));
        }

        if self.fetch_max_bytes < MIN_FETCH_MAX_BYTES || self.fetch_max_bytes > MAX_FETCH_MAX_BYTES
        {
            return Err(ConfigError::queue(format!(
                "queue.fetch_max_bytes must be {}-{}, got {}",
                MIN_FETCH_MAX_BYTES, MAX_FETCH_MAX_BYTES, self.fetch_max_bytes
            )));
        }

        Ok(())
    }
}
