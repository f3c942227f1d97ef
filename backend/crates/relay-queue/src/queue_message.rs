use crate::{QueueError, Result as QueueErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;

/// One record read from the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub partition: i32,
    pub offset: i64,
    /// Raw record value; `None` for tombstones
    pub value: Option<Vec<u8>>,
}

impl QueueMessage {
    pub fn new(partition: i32, offset: i64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            partition,
            offset,
            value: Some(value.into()),
        }
    }

    /// Decode the value as UTF-8 text, then parse it as JSON
    pub fn decode(&self) -> QueueErrorResult<Value> {
        let bytes = self.value.as_deref().ok_or_else(|| QueueError::EmptyValue {
            partition: self.partition,
            offset: self.offset,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let text = std::str::from_utf8(bytes).map_err(|source| QueueError::InvalidUtf8 {
            partition: self.partition,
            offset: self.offset,
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        serde_json::from_str(text).map_err(|source| QueueError::InvalidJson {
            partition: self.partition,
            offset: self.offset,
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Value rendered for logs, lossy for non-UTF-8 bytes
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => String::from("<none>"),
        }
    }
}
