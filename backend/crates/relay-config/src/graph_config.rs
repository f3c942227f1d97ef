use crate::{ConfigError, ConfigErrorResult, DEFAULT_GRAPH_HOST, DEFAULT_GRAPH_PORT};

use serde::Deserialize;

/// Graph database (Bolt) connection and one-time setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Statements executed in order once at startup
    pub setup_statements: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_GRAPH_HOST),
            port: DEFAULT_GRAPH_PORT,
            user: String::new(),
            password: String::new(),
            setup_statements: Vec::new(),
        }
    }
}

impl GraphConfig {
    pub fn uri(&self) -> String {
        format!("bolt://{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::graph("graph.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::graph("graph.port must not be 0"));
        }

        if let Some(index) = self
            .setup_statements
            .iter()
            .position(|statement| statement.trim().is_empty())
        {
            return Err(ConfigError::graph(format!(
                "graph.setup_statements[{index}] is empty"
            )));
        }

        Ok(())
    }
}
