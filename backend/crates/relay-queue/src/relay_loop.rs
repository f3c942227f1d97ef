use crate::{Emitter, MessageSource, QueueError, QueueMessage, RelayMetrics};

use relay_ws::ShutdownGuard;

use std::time::Duration;

use log::{debug, info, warn};
use serde_json::json;

/// Result of one poll-and-forward pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The poll returned nothing
    Idle,
    /// The poll itself failed; treated like an idle pass
    PollFailed,
    /// A non-empty batch was processed
    Relayed {
        forwarded: usize,
        failed: usize,
        /// Payloads that could not be decoded
        skipped: usize,
        /// Messages without a value
        empty: usize,
    },
}

impl PassOutcome {
    /// Whether the loop should sleep before polling again
    pub fn is_idle(&self) -> bool {
        matches!(self, PassOutcome::Idle | PassOutcome::PollFailed)
    }
}

enum MessageOutcome {
    Forwarded,
    Failed,
    Skipped,
    Empty,
}

/// Bridges a pull-based queue to the push-based broadcast channel.
///
/// Every decoded message is emitted on `channel` as `{"data": <value>}`.
/// Delivery is best-effort: a failing emit or an undecodable payload is
/// logged and the loop moves on to the next message.
pub struct RelayLoop<S, E> {
    source: S,
    emitter: E,
    channel: String,
    idle_interval: Duration,
    metrics: RelayMetrics,
}

impl<S, E> RelayLoop<S, E>
where
    S: MessageSource,
    E: Emitter,
{
    pub fn new(source: S, emitter: E, channel: impl Into<String>, idle_interval: Duration) -> Self {
        Self {
            source,
            emitter,
            channel: channel.into(),
            idle_interval,
            metrics: RelayMetrics::new(),
        }
    }

    /// Run until shutdown is signalled.
    ///
    /// Shutdown interrupts an in-flight poll or an idle sleep; messages of
    /// a batch that was being forwarded at that moment are dropped.
    pub async fn run(mut self, mut shutdown: ShutdownGuard) {
        info!("Relay loop started, emitting on '{}'", self.channel);

        loop {
            let outcome = tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                outcome = self.poll_once() => outcome,
            };

            if outcome.is_idle() {
                tokio::select! {
                    biased;
                    _ = shutdown.wait() => break,
                    _ = tokio::time::sleep(self.idle_interval) => {}
                }
            } else {
                debug!("Relay pass: {outcome:?}");
            }
        }

        info!("Relay loop stopped");
    }

    /// Poll once and forward everything the poll returned
    pub async fn poll_once(&mut self) -> PassOutcome {
        let batch = match self.source.poll().await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Queue poll failed: {e}");
                self.metrics.poll_failed();
                return PassOutcome::PollFailed;
            }
        };

        if batch.is_empty() {
            self.metrics.idle_poll();
            return PassOutcome::Idle;
        }

        let (mut forwarded, mut failed, mut skipped, mut empty) = (0, 0, 0, 0);

        for message in batch {
            self.metrics.message_consumed();
            match relay_message(&self.emitter, &self.channel, &self.metrics, &message).await {
                MessageOutcome::Forwarded => forwarded += 1,
                MessageOutcome::Failed => failed += 1,
                MessageOutcome::Skipped => skipped += 1,
                MessageOutcome::Empty => empty += 1,
            }
        }

        PassOutcome::Relayed {
            forwarded,
            failed,
            skipped,
            empty,
        }
    }
}

async fn relay_message<E: Emitter>(
    emitter: &E,
    channel: &str,
    metrics: &RelayMetrics,
    message: &QueueMessage,
) -> MessageOutcome {
    let value = match message.decode() {
        Ok(value) => value,
        Err(QueueError::EmptyValue { .. }) => {
            debug!(
                "Skipping message {}/{} without a value",
                message.partition, message.offset
            );
            metrics.message_empty();
            return MessageOutcome::Empty;
        }
        Err(e) => {
            warn!("Skipping `{}`: {e}", message.display_value());
            metrics.decode_failed();
            return MessageOutcome::Skipped;
        }
    };

    debug!("Message: {value}");
    let envelope = json!({ "data": value });

    match emitter.emit(channel, &envelope).await {
        Ok(receivers) => {
            metrics.message_forwarded(receivers);
            MessageOutcome::Forwarded
        }
        Err(e) => {
            warn!("`{}`, {e}", envelope["data"]);
            metrics.emit_failed();
            MessageOutcome::Failed
        }
    }
}
