use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to connect to queue at {bootstrap}: {source} {location}")]
    Connect {
        bootstrap: String,
        #[source]
        source: rskafka::client::error::Error,
        location: ErrorLocation,
    },

    #[error("Failed to read metadata for topic {topic}: {source} {location}")]
    Metadata {
        topic: String,
        #[source]
        source: rskafka::client::error::Error,
        location: ErrorLocation,
    },

    #[error("Fetch from {topic}/{partition} failed: {source} {location}")]
    Fetch {
        topic: String,
        partition: i32,
        #[source]
        source: rskafka::client::error::Error,
        location: ErrorLocation,
    },

    #[error("Message {partition}/{offset} is not UTF-8: {source} {location}")]
    InvalidUtf8 {
        partition: i32,
        offset: i64,
        #[source]
        source: std::str::Utf8Error,
        location: ErrorLocation,
    },

    #[error("Message {partition}/{offset} is not JSON: {source} {location}")]
    InvalidJson {
        partition: i32,
        offset: i64,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Message {partition}/{offset} has no value {location}")]
    EmptyValue {
        partition: i32,
        offset: i64,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, QueueError>;
