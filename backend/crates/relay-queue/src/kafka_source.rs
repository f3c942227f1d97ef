use crate::partition_set::PartitionSet;
use crate::{MessageSource, PollBatch, QueueError, QueueMessage, Result as QueueErrorResult};

use relay_config::{QueueConfig, StartOffset};

use std::ops::Range;
use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use futures::future::join_all;
use log::{debug, info, warn};
use rskafka::client::partition::{OffsetAt, PartitionClient, UnknownTopicHandling};
use rskafka::client::{Client, ClientBuilder};
use tokio::time::Instant;

/// How often topic metadata is re-read to pick up added partitions
const METADATA_REFRESH: Duration = Duration::from_secs(30);

/// Kafka topic consumer without a consumer group.
///
/// Reads every partition of one topic, tracking offsets in memory only;
/// nothing is committed back to the broker.
pub struct KafkaSource {
    client: Client,
    topic: String,
    start_offset: StartOffset,
    fetch_max_wait_ms: i32,
    fetch_max_bytes: i32,
    partitions: PartitionSet<PartitionCursor>,
    /// Whether the last resolution covered every listed partition
    resolved_all: bool,
    last_resolved: Instant,
}

struct PartitionCursor {
    partition: i32,
    client: PartitionClient,
    next_offset: i64,
}

impl KafkaSource {
    /// Connect to the bootstrap broker and resolve the topic's partitions.
    ///
    /// A topic that does not exist yet is not an error: it is resolved
    /// again on later polls.
    pub async fn connect(config: &QueueConfig) -> QueueErrorResult<Self> {
        let bootstrap = config.bootstrap_server();
        info!("Connecting to queue at {bootstrap}");

        let client = ClientBuilder::new(vec![bootstrap.clone()])
            .build()
            .await
            .map_err(|source| QueueError::Connect {
                bootstrap: bootstrap.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut source = Self {
            client,
            topic: config.topic.clone(),
            start_offset: config.start_offset,
            fetch_max_wait_ms: config.fetch_max_wait_ms,
            fetch_max_bytes: config.fetch_max_bytes,
            partitions: PartitionSet::new(),
            resolved_all: false,
            last_resolved: Instant::now(),
        };

        source.resolve_partitions().await?;
        info!(
            "Queue connection established ({} partitions of '{}')",
            source.partitions.len(),
            source.topic
        );

        Ok(source)
    }

    fn resolve_due(&self) -> bool {
        self.partitions.is_empty()
            || !self.resolved_all
            || self.last_resolved.elapsed() >= METADATA_REFRESH
    }

    /// Read topic metadata and open a cursor for every partition not yet
    /// tracked. Known partitions keep their offsets.
    async fn resolve_partitions(&mut self) -> QueueErrorResult<()> {
        self.last_resolved = Instant::now();
        self.resolved_all = false;

        let topics = self
            .client
            .list_topics()
            .await
            .map_err(|source| metadata_error(&self.topic, source))?;

        let Some(topic) = topics.into_iter().find(|t| t.name == self.topic) else {
            warn!("Topic '{}' does not exist yet, will retry", self.topic);
            return Ok(());
        };

        let (client, topic_name, start_offset) =
            (&self.client, self.topic.as_str(), self.start_offset);
        let added = self
            .partitions
            .resolve_missing(topic.partitions, |partition| {
                open_cursor(client, topic_name, start_offset, partition)
            })
            .await?;

        if added > 0 {
            info!(
                "Reading {} partitions of '{}' ({} new)",
                self.partitions.len(),
                self.topic,
                added
            );
        }

        self.resolved_all = true;
        Ok(())
    }
}

async fn open_cursor(
    client: &Client,
    topic: &str,
    start_offset: StartOffset,
    partition: i32,
) -> QueueErrorResult<PartitionCursor> {
    let partition_client = client
        .partition_client(topic.to_string(), partition, UnknownTopicHandling::Retry)
        .await
        .map_err(|source| metadata_error(topic, source))?;

    let next_offset = partition_client
        .get_offset(offset_at(start_offset))
        .await
        .map_err(|source| metadata_error(topic, source))?;

    debug!("Partition {topic}/{partition} starts at offset {next_offset}");

    Ok(PartitionCursor {
        partition,
        client: partition_client,
        next_offset,
    })
}

#[track_caller]
fn metadata_error(topic: &str, source: rskafka::client::error::Error) -> QueueError {
    QueueError::Metadata {
        topic: topic.to_string(),
        source,
        location: ErrorLocation::from(Location::caller()),
    }
}

fn offset_at(start_offset: StartOffset) -> OffsetAt {
    match start_offset {
        StartOffset::Latest => OffsetAt::Latest,
        StartOffset::Earliest => OffsetAt::Earliest,
    }
}

#[async_trait]
impl MessageSource for KafkaSource {
    async fn poll(&mut self) -> QueueErrorResult<PollBatch> {
        if self.resolve_due()
            && let Err(e) = self.resolve_partitions().await
        {
            if self.partitions.is_empty() {
                return Err(e);
            }
            warn!(
                "Partition refresh for '{}' failed, reading {} known partitions: {e}",
                self.topic,
                self.partitions.len()
            );
        }

        if self.partitions.is_empty() {
            return Ok(PollBatch::new());
        }

        let topic = &self.topic;
        let bytes = 1..self.fetch_max_bytes;
        let max_wait_ms = self.fetch_max_wait_ms;

        let results = join_all(
            self.partitions
                .values_mut()
                .map(|cursor| cursor.fetch(topic, bytes.clone(), max_wait_ms)),
        )
        .await;

        let mut batch = PollBatch::new();
        let mut first_error = None;
        let mut failed = 0;

        for result in results {
            match result {
                Ok(messages) => batch.extend(messages),
                Err(e) => {
                    warn!("{e}");
                    failed += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        // Only surface an error when no partition could be read at all
        match first_error {
            Some(e) if failed == self.partitions.len() => Err(e),
            _ => Ok(batch),
        }
    }
}

impl PartitionCursor {
    async fn fetch(
        &mut self,
        topic: &str,
        bytes: Range<i32>,
        max_wait_ms: i32,
    ) -> QueueErrorResult<Vec<QueueMessage>> {
        let (records, _high_watermark) = self
            .client
            .fetch_records(self.next_offset, bytes, max_wait_ms)
            .await
            .map_err(|source| QueueError::Fetch {
                topic: topic.to_string(),
                partition: self.partition,
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Compressed record batches may start before the requested offset
        let messages: Vec<QueueMessage> = records
            .into_iter()
            .filter(|r| r.offset >= self.next_offset)
            .map(|r| QueueMessage {
                partition: self.partition,
                offset: r.offset,
                value: r.record.value,
            })
            .collect();

        if let Some(last) = messages.last() {
            self.next_offset = last.offset + 1;
        }

        Ok(messages)
    }
}
