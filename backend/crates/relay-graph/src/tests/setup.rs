use crate::tests::RecordingGraph;
use crate::{GraphError, run_setup};

use googletest::assert_that;
use googletest::prelude::{anything, ok};

fn statements(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn given_statements_when_setup_then_executed_in_order() {
    // Given
    let graph = RecordingGraph::default();
    let setup = statements(&[
        "CREATE INDEX ON :User(id);",
        "CREATE INDEX ON :Tweet(id);",
        "CREATE CONSTRAINT ON (u:User) ASSERT u.id IS UNIQUE;",
    ]);

    // When
    let result = run_setup(&graph, &setup).await;

    // Then
    assert_that!(result, ok(anything()));
    assert_eq!(*graph.executed.lock().unwrap(), setup);
}

#[tokio::test]
async fn given_no_statements_when_setup_then_nothing_executed() {
    let graph = RecordingGraph::default();

    let result = run_setup(&graph, &[]).await;

    assert!(result.is_ok());
    assert!(graph.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_failing_statement_when_setup_then_stops_and_reports_it() {
    // Given
    let graph = RecordingGraph {
        fail_on: Some("BROKEN".to_string()),
        ..Default::default()
    };
    let setup = statements(&["FIRST", "BROKEN", "NEVER"]);

    // When
    let result = run_setup(&graph, &setup).await;

    // Then
    match result {
        Err(GraphError::Statement { statement, .. }) => assert_eq!(statement, "BROKEN"),
        other => panic!("expected statement error, got {other:?}"),
    }
    assert_eq!(*graph.executed.lock().unwrap(), statements(&["FIRST"]));
}
