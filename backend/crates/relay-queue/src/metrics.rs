use metrics::counter;

/// Metrics collector for the relay loop
#[derive(Clone)]
pub struct RelayMetrics {
    prefix: &'static str,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "relay_queue",
        }
    }

    /// Record a message taken from the queue
    pub fn message_consumed(&self) {
        counter!(format!("{}.messages.consumed", self.prefix)).increment(1);
    }

    /// Record a message handed to the emitter
    pub fn message_forwarded(&self, receivers: usize) {
        counter!(format!("{}.messages.forwarded", self.prefix)).increment(1);
        counter!(format!("{}.messages.deliveries", self.prefix)).increment(receivers as u64);
    }

    /// Record an emitter failure
    pub fn emit_failed(&self) {
        counter!(format!("{}.errors.emit", self.prefix)).increment(1);
    }

    /// Record a payload that could not be decoded
    pub fn decode_failed(&self) {
        counter!(format!("{}.errors.decode", self.prefix)).increment(1);
    }

    /// Record a message without a value (tombstone)
    pub fn message_empty(&self) {
        counter!(format!("{}.messages.empty", self.prefix)).increment(1);
    }

    /// Record a poll failure
    pub fn poll_failed(&self) {
        counter!(format!("{}.errors.poll", self.prefix)).increment(1);
    }

    /// Record a poll that returned nothing
    pub fn idle_poll(&self) {
        counter!(format!("{}.polls.idle", self.prefix)).increment(1);
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
