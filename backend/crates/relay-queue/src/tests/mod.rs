mod partition_set;

use crate::{Emitter, MessageSource, PollBatch, Result as QueueErrorResult};

use relay_ws::{Result as WsErrorResult, ShutdownCoordinator, WsError};

use std::collections::VecDeque;
use std::panic::Location;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde_json::Value;
use tokio::time::Instant;

/// Replays a fixed list of poll results, then triggers shutdown and keeps
/// returning empty batches.
pub(crate) struct ScriptedSource {
    script: VecDeque<QueueErrorResult<PollBatch>>,
    shutdown: ShutdownCoordinator,
    pub(crate) polled_at: Arc<Mutex<Vec<Instant>>>,
}

impl ScriptedSource {
    pub(crate) fn new(
        script: impl IntoIterator<Item = QueueErrorResult<PollBatch>>,
        shutdown: ShutdownCoordinator,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            shutdown,
            polled_at: Arc::default(),
        }
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn poll(&mut self) -> QueueErrorResult<PollBatch> {
        self.polled_at.lock().unwrap().push(Instant::now());
        match self.script.pop_front() {
            Some(result) => result,
            None => {
                self.shutdown.shutdown();
                Ok(PollBatch::new())
            }
        }
    }
}

/// Records every emit; fails when `data` equals `fail_on`
#[derive(Clone, Default)]
pub(crate) struct RecordingEmitter {
    pub(crate) emitted: Arc<Mutex<Vec<(String, Value)>>>,
    pub(crate) fail_on: Option<Value>,
}

impl RecordingEmitter {
    pub(crate) fn failing_on(data: Value) -> Self {
        Self {
            fail_on: Some(data),
            ..Default::default()
        }
    }

    pub(crate) fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Emitter for RecordingEmitter {
    async fn emit(&self, event: &str, payload: &Value) -> WsErrorResult<usize> {
        if self.fail_on.as_ref() == payload.get("data") {
            return Err(WsError::SendBufferClosed {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.emitted
            .lock()
            .unwrap()
            .push((event.to_string(), payload.clone()));
        Ok(1)
    }
}
