use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BROADCAST_CAPACITY, DEFAULT_BROADCAST_CHANNEL,
    MAX_BROADCAST_CAPACITY, MIN_BROADCAST_CAPACITY,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Event name every relayed message is emitted under
    pub channel: String,
    /// Messages buffered for subscribers before slow ones start lagging
    pub capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel: String::from(DEFAULT_BROADCAST_CHANNEL),
            capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl BroadcastConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.channel.trim().is_empty() {
            return Err(ConfigError::broadcast("broadcast.channel must not be empty"));
        }

        if self.capacity < MIN_BROADCAST_CAPACITY || self.capacity > MAX_BROADCAST_CAPACITY {
            return Err(ConfigError::broadcast(format!(
                "broadcast.capacity must be {}-{}, got {}",
                MIN_BROADCAST_CAPACITY, MAX_BROADCAST_CAPACITY, self.capacity
            )));
        }

        Ok(())
    }
}
