pub mod emitter;
pub mod error;
pub mod kafka_source;
pub mod message_source;
pub mod metrics;
mod partition_set;
pub mod poll_batch;
pub mod queue_message;
pub mod relay_loop;

pub use emitter::Emitter;
pub use error::{QueueError, Result};
pub use kafka_source::KafkaSource;
pub use message_source::MessageSource;
pub use metrics::RelayMetrics;
pub use poll_batch::PollBatch;
pub use queue_message::QueueMessage;
pub use relay_loop::{PassOutcome, RelayLoop};

#[cfg(test)]
mod tests;
