//! Service tests for bulk update and bulk delete.

use super::{TestContext, draft, test_epoch};
use crate::task::domain::{HistoryAction, TaskId, TaskPatch, TaskStatus};
use crate::task::ports::{HistoryLedger, TaskRepository};
use crate::task::services::TaskMutationError;
use chrono::Duration;
use rstest::{fixture, rstest};

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_skips_missing_ids_and_counts_changes(context: TestContext) {
    let mutation = context.mutation();
    let first = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    let second = mutation
        .create(draft("X-2", "Cover"))
        .await
        .expect("create succeeds");
    let missing = TaskId::new();

    context.clock.advance(Duration::minutes(1));
    let patch = TaskPatch::new().with_status(TaskStatus::done());
    let outcome = mutation
        .bulk_update(&[first.id(), second.id(), missing], &patch)
        .await
        .expect("bulk update succeeds");

    assert_eq!(outcome.updated_count, 2);
    assert!(outcome.errors.is_empty());

    for id in [first.id(), second.id()] {
        let task = context
            .repository
            .find_by_id(id)
            .await
            .expect("lookup succeeds")
            .expect("task present");
        assert!(task.status().is_done());
        assert_eq!(
            task.completed_at(),
            Some(test_epoch() + Duration::minutes(1))
        );

        let history = context
            .ledger
            .for_task(id)
            .await
            .expect("history readable");
        let bulk_entries: Vec<_> = history
            .iter()
            .filter(|entry| entry.action() == HistoryAction::BulkUpdated)
            .collect();
        assert_eq!(bulk_entries.len(), 1);
        assert_eq!(
            bulk_entries[0].details(),
            "Changes: status: 'in-development' -> 'done'"
        );
        assert!(!bulk_entries[0].can_revert());
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_consolidates_fields_into_one_entry(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");

    let patch = TaskPatch::new()
        .with_status(TaskStatus::new("in-progress"))
        .with_responsible("petrov");
    let outcome = mutation
        .bulk_update(&[task.id()], &patch)
        .await
        .expect("bulk update succeeds");
    assert_eq!(outcome.updated_count, 1);

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    // Created + one consolidated BulkUpdated entry, not one per field.
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action(), HistoryAction::BulkUpdated);
    assert_eq!(
        history[0].details(),
        "Changes: status: 'in-development' -> 'in-progress', responsible: '' -> 'petrov'"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_counts_unchanged_tasks_as_not_updated(context: TestContext) {
    let mutation = context.mutation();
    let done = mutation
        .create(draft("X-1", "Housing").with_status(TaskStatus::done()))
        .await
        .expect("create succeeds");
    let fresh = mutation
        .create(draft("X-2", "Cover"))
        .await
        .expect("create succeeds");

    let patch = TaskPatch::new().with_status(TaskStatus::done());
    let outcome = mutation
        .bulk_update(&[done.id(), fresh.id()], &patch)
        .await
        .expect("bulk update succeeds");

    // The already-done task is present but unchanged, so it does not
    // count as updated and gets no ledger entry.
    assert_eq!(outcome.updated_count, 1);
    let history = context
        .ledger
        .for_task(done.id())
        .await
        .expect("history readable");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action(), HistoryAction::Created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_rejects_empty_id_list(context: TestContext) {
    let mutation = context.mutation();
    let result = mutation
        .bulk_update(&[], &TaskPatch::new().with_priority("high"))
        .await;
    assert!(matches!(result, Err(TaskMutationError::EmptyIdList)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_reports_names_and_skips_missing(context: TestContext) {
    let mutation = context.mutation();
    let first = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    let second = mutation
        .create(draft("X-2", "Cover"))
        .await
        .expect("create succeeds");

    let outcome = mutation
        .bulk_delete(&[first.id(), TaskId::new(), second.id()])
        .await
        .expect("bulk delete succeeds");

    assert_eq!(outcome.deleted_count, 2);
    assert_eq!(outcome.deleted_names, vec!["Housing", "Cover"]);
    assert!(outcome.errors.is_empty());
    assert!(
        context
            .repository
            .find_by_id(first.id())
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_rejects_empty_id_list(context: TestContext) {
    let mutation = context.mutation();
    assert!(matches!(
        mutation.bulk_delete(&[]).await,
        Err(TaskMutationError::EmptyIdList)
    ));
}
