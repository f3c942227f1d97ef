use crate::QueueError;
use crate::partition_set::PartitionSet;

use std::panic::Location;
use std::sync::Mutex;

use error_location::ErrorLocation;

fn metadata_error() -> QueueError {
    QueueError::Metadata {
        topic: "created_objects".to_string(),
        source: rskafka::client::error::Error::InvalidResponse("leader not available".to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn values(set: &mut PartitionSet<i64>) -> Vec<i64> {
    set.values_mut().map(|value| *value).collect()
}

#[tokio::test]
async fn given_listing_with_known_and_duplicate_ids_when_missing_then_new_ids_ascending() {
    let mut set = PartitionSet::new();
    set.resolve_missing([1], |_| async { Ok(0_i64) }).await.unwrap();

    assert_eq!(set.missing([3, 1, 0, 3, 2]), vec![0, 2, 3]);
}

#[tokio::test]
async fn given_empty_set_when_every_partition_resolves_then_all_added() {
    let mut set = PartitionSet::new();

    let added = set
        .resolve_missing([0, 1, 2], |partition| async move { Ok(i64::from(partition) * 10) })
        .await
        .unwrap();

    assert_eq!(added, 3);
    assert_eq!(values(&mut set), vec![0, 10, 20]);
}

#[tokio::test]
async fn given_one_partition_fails_when_resolving_then_nothing_added() {
    // Given
    let mut set: PartitionSet<i64> = PartitionSet::new();

    // When
    let result = set
        .resolve_missing([0, 1, 2], |partition| async move {
            if partition == 1 {
                Err(metadata_error())
            } else {
                Ok(i64::from(partition))
            }
        })
        .await;

    // Then
    assert!(matches!(result, Err(QueueError::Metadata { .. })));
    assert!(set.is_empty());
    assert!(!set.contains(0));
}

#[tokio::test]
async fn given_failed_resolution_when_retried_then_every_partition_added() {
    let mut set: PartitionSet<i64> = PartitionSet::new();
    let _ = set
        .resolve_missing([0, 1], |_| async { Err(metadata_error()) })
        .await;

    let added = set
        .resolve_missing([0, 1], |partition| async move { Ok(i64::from(partition)) })
        .await
        .unwrap();

    assert_eq!(added, 2);
    assert_eq!(set.len(), 2);
}

#[tokio::test]
async fn given_known_partitions_when_topic_grows_then_only_new_partitions_resolved() {
    // Given
    let mut set = PartitionSet::new();
    set.resolve_missing([0, 1], |_| async { Ok(100_i64) })
        .await
        .unwrap();
    for offset in set.values_mut() {
        *offset += 5;
    }
    let resolved = Mutex::new(Vec::new());

    // When
    let added = set
        .resolve_missing([0, 1, 2, 3], |partition| {
            resolved.lock().unwrap().push(partition);
            async { Ok(0_i64) }
        })
        .await
        .unwrap();

    // Then
    assert_eq!(added, 2);
    assert_eq!(*resolved.lock().unwrap(), vec![2, 3]);
    assert_eq!(values(&mut set), vec![105, 105, 0, 0]);
}

#[tokio::test]
async fn given_complete_set_when_resolving_same_listing_then_nothing_resolved() {
    let mut set = PartitionSet::new();
    set.resolve_missing([0], |_| async { Ok(1_i64) }).await.unwrap();

    let added = set
        .resolve_missing([0], |_| async { Err(metadata_error()) })
        .await
        .unwrap();

    assert_eq!(added, 0);
    assert_eq!(set.len(), 1);
}
