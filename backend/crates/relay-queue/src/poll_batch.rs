use crate::QueueMessage;

use std::collections::BTreeMap;

/// Messages returned by one poll, grouped by partition.
///
/// Iteration visits partitions in ascending order and, within a partition,
/// messages in the order they were added (offset order).
#[derive(Debug, Clone, Default)]
pub struct PollBatch {
    partitions: BTreeMap<i32, Vec<QueueMessage>>,
}

impl PollBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: QueueMessage) {
        self.partitions
            .entry(message.partition)
            .or_default()
            .push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = QueueMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn messages(&self) -> impl Iterator<Item = &QueueMessage> {
        self.partitions.values().flatten()
    }
}

impl FromIterator<QueueMessage> for PollBatch {
    fn from_iter<I: IntoIterator<Item = QueueMessage>>(iter: I) -> Self {
        let mut batch = PollBatch::new();
        batch.extend(iter);
        batch
    }
}

impl IntoIterator for PollBatch {
    type Item = QueueMessage;
    type IntoIter = std::iter::Flatten<std::collections::btree_map::IntoValues<i32, Vec<QueueMessage>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.partitions.into_values().flatten()
    }
}
