pub mod bolt_graph;
pub mod error;
pub mod graph_client;
pub mod setup;

pub use bolt_graph::BoltGraph;
pub use error::{GraphError, Result};
pub use graph_client::GraphClient;
pub use setup::run_setup;

#[cfg(test)]
mod tests;
