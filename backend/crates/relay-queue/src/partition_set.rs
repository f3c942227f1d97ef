use crate::Result as QueueErrorResult;

use std::collections::BTreeMap;
use std::future::Future;

/// Per-partition state of one topic, iterated in partition order.
///
/// Partitions are added only through `resolve_missing`, which commits every
/// newly listed partition or none of them, so a failed resolution is simply
/// retried in full on the next call.
#[derive(Debug)]
pub(crate) struct PartitionSet<T> {
    entries: BTreeMap<i32, T>,
}

impl<T> Default for PartitionSet<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> PartitionSet<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, partition: i32) -> bool {
        self.entries.contains_key(&partition)
    }

    /// Listed partitions that have no state yet, ascending, without duplicates
    pub(crate) fn missing(&self, listed: impl IntoIterator<Item = i32>) -> Vec<i32> {
        let mut missing: Vec<i32> = listed
            .into_iter()
            .filter(|partition| !self.contains(*partition))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Resolve state for every missing partition, then add all of it.
    ///
    /// Returns how many partitions were added. On error nothing is added.
    pub(crate) async fn resolve_missing<F, Fut>(
        &mut self,
        listed: impl IntoIterator<Item = i32>,
        mut resolve: F,
    ) -> QueueErrorResult<usize>
    where
        F: FnMut(i32) -> Fut,
        Fut: Future<Output = QueueErrorResult<T>>,
    {
        let missing = self.missing(listed);

        let mut resolved = Vec::with_capacity(missing.len());
        for partition in missing {
            resolved.push((partition, resolve(partition).await?));
        }

        let added = resolved.len();
        self.entries.extend(resolved);
        Ok(added)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}
