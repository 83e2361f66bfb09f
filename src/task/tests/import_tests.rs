//! Service tests for batch import.

use super::{TestContext, draft};
use crate::task::domain::{HistoryAction, TaskFilter, TaskSort, TaskStatus};
use crate::task::ports::{HistoryLedger, ImportRow, TaskRepository};
use rstest::{fixture, rstest};

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn row(number: &str, name: &str) -> ImportRow {
    ImportRow::new()
        .with_column("Number", number)
        .with_column("Name", name)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_commits_clean_rows_and_reports_collisions(context: TestContext) {
    context
        .mutation()
        .create(draft("2023/001", "Housing"))
        .await
        .expect("create succeeds");

    let outcome = context
        .import()
        .import(
            vec![row("2023/001", "Duplicate housing"), row("2023/002", "Cover")],
            "orders.xlsx",
        )
        .await;

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(
        outcome.errors[0],
        "row 2: task with number '2023/001' already exists"
    );

    let listed = context
        .query()
        .list(&TaskFilter::active(), TaskSort::default())
        .await
        .expect("list succeeds");
    assert_eq!(listed.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_applies_defaults_and_logs_imported_entries(context: TestContext) {
    let outcome = context
        .import()
        .import(
            vec![
                ImportRow::new()
                    .with_column("NUMBER", "2023/010")
                    .with_column("name", "Bearing")
                    .with_column("Description", "rolling bearing")
                    .with_column("STATUS", "prepared"),
            ],
            "orders.xlsx",
        )
        .await;
    assert_eq!(outcome.created, 1);
    assert!(outcome.errors.is_empty());

    let task = context
        .repository
        .find_by_number(&crate::task::domain::TaskNumber::new("2023/010").expect("valid number"))
        .await
        .expect("lookup succeeds")
        .expect("task present");
    assert_eq!(task.name(), "Bearing");
    assert_eq!(task.description(), "rolling bearing");
    assert_eq!(task.status().as_str(), "prepared");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action(), HistoryAction::Imported);
    assert_eq!(history[0].details(), "Task imported from 'orders.xlsx'");
    assert!(!history[0].can_revert());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_synthesizes_numbers_from_row_position(context: TestContext) {
    let outcome = context
        .import()
        .import(
            vec![
                ImportRow::new().with_column("name", "First"),
                ImportRow::new()
                    .with_column("number", "   ")
                    .with_column("name", "Second"),
            ],
            "orders.xlsx",
        )
        .await;
    assert_eq!(outcome.created, 2);

    let listed = context
        .query()
        .list(&TaskFilter::active(), TaskSort::default())
        .await
        .expect("list succeeds");
    let numbers: Vec<_> = listed
        .iter()
        .map(|task| task.number().as_str().to_owned())
        .collect();
    assert!(numbers.contains(&"AUTO-0".to_owned()));
    assert!(numbers.contains(&"AUTO-1".to_owned()));

    for task in &listed {
        assert_eq!(task.status().as_str(), TaskStatus::IN_DEVELOPMENT);
        assert_eq!(task.description(), "");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_row_errors_reference_spreadsheet_rows(context: TestContext) {
    context
        .mutation()
        .create(draft("B-2", "Taken"))
        .await
        .expect("create succeeds");

    let outcome = context
        .import()
        .import(
            vec![row("B-1", "First"), row("B-2", "Collides"), row("B-3", "Third")],
            "batch.xlsx",
        )
        .await;

    assert_eq!(outcome.created, 2);
    // Position 1 plus the header offset gives spreadsheet row 3.
    assert_eq!(
        outcome.errors,
        vec!["row 3: task with number 'B-2' already exists".to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_of_empty_batch_is_a_clean_no_op(context: TestContext) {
    let outcome = context.import().import(Vec::new(), "empty.xlsx").await;
    assert_eq!(outcome.created, 0);
    assert!(outcome.errors.is_empty());
}
