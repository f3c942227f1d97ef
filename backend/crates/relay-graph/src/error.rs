use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to connect to graph database at {uri}: {source} {location}")]
    Connect {
        uri: String,
        #[source]
        source: neo4rs::Error,
        location: ErrorLocation,
    },

    #[error("Graph statement failed `{statement}`: {message} {location}")]
    Statement {
        statement: String,
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
