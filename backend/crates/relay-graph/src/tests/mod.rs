mod setup;

use crate::{GraphClient, GraphError, Result as GraphErrorResult};

use std::panic::Location;
use std::sync::Mutex;

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Records every statement; fails the ones matching `fail_on`
#[derive(Default)]
pub(crate) struct RecordingGraph {
    pub(crate) executed: Mutex<Vec<String>>,
    pub(crate) fail_on: Option<String>,
}

#[async_trait]
impl GraphClient for RecordingGraph {
    async fn execute(&self, statement: &str) -> GraphErrorResult<()> {
        if self.fail_on.as_deref() == Some(statement) {
            return Err(GraphError::Statement {
                statement: statement.to_string(),
                message: "syntax error".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.executed.lock().unwrap().push(statement.to_string());
        Ok(())
    }
}
