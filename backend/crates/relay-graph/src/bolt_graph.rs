use crate::{GraphClient, GraphError, Result as GraphErrorResult};

use relay_config::GraphConfig;

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, info};
use neo4rs::{ConfigBuilder, Graph, query};

const MAX_CONNECTIONS: usize = 4;

/// Graph client speaking Bolt (Memgraph, Neo4j)
#[derive(Clone)]
pub struct BoltGraph {
    graph: Graph,
}

impl BoltGraph {
    /// Open a connection pool and prove it works with a trivial query,
    /// so an unreachable database fails here instead of on first use.
    pub async fn connect(config: &GraphConfig) -> GraphErrorResult<Self> {
        let uri = config.uri();
        info!("Connecting to graph database at {uri}");

        let connect_error = |source: neo4rs::Error| GraphError::Connect {
            uri: uri.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        let neo_config = ConfigBuilder::default()
            .uri(uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(MAX_CONNECTIONS)
            .build()
            .map_err(connect_error)?;

        let graph = Graph::connect(neo_config).await.map_err(connect_error)?;
        graph.run(query("RETURN 1")).await.map_err(connect_error)?;

        info!("Graph database connection established");

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphClient for BoltGraph {
    async fn execute(&self, statement: &str) -> GraphErrorResult<()> {
        debug!("Executing graph statement: {statement}");

        self.graph
            .run(query(statement))
            .await
            .map_err(|e| GraphError::Statement {
                statement: statement.to_string(),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
