//! Service tests for create, update, and delete.

use super::{TestContext, draft, test_epoch};
use crate::task::domain::{
    HistoryAction, TaskFilter, TaskId, TaskNumber, TaskPatch, TaskSort, TaskStatus,
};
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
async fn create_persists_task_and_logs_created_entry(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("2023/001", "Housing"))
        .await
        .expect("create succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action(), HistoryAction::Created);
    assert_eq!(history[0].details(), "Created new task 'Housing'");
    assert!(!history[0].can_revert());
    assert_eq!(history[0].actor(), "system");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_number_without_writing(context: TestContext) {
    let mutation = context.mutation();
    mutation
        .create(draft("2023/001", "Housing"))
        .await
        .expect("first create succeeds");

    let result = mutation.create(draft("2023/001", "Cover")).await;
    assert!(matches!(
        result,
        Err(TaskMutationError::DuplicateNumber(ref number)) if number.as_str() == "2023/001"
    ));

    // The conflicting draft must leave no trace: one task, one entry.
    let listed = context
        .query()
        .list(&TaskFilter::active(), TaskSort::default())
        .await
        .expect("list succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), "Housing");
    assert_eq!(context.ledger.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_check_covers_archived_tasks(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("2022/050", "Flange").with_status(TaskStatus::done()))
        .await
        .expect("create succeeds");
    context
        .repository
        .archive(task.id())
        .await
        .expect("archive succeeds");

    let result = mutation.create(draft("2022/050", "New flange")).await;
    assert!(matches!(
        result,
        Err(TaskMutationError::DuplicateNumber(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_logs_one_entry_per_changed_field(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("2023/001", "Housing"))
        .await
        .expect("create succeeds");

    context.clock.advance(Duration::minutes(5));
    let patch = TaskPatch::new()
        .with_name("Housing v2")
        .with_priority("high");
    let updated = mutation
        .update(task.id(), &patch)
        .await
        .expect("update succeeds");

    assert_eq!(updated.name(), "Housing v2");
    assert_eq!(updated.priority(), Some("high"));
    assert_eq!(updated.updated_at(), test_epoch() + Duration::minutes(5));

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let updates: Vec<_> = history
        .iter()
        .filter(|entry| entry.action() == HistoryAction::Updated)
        .collect();
    assert_eq!(updates.len(), 2);
    for entry in &updates {
        assert!(entry.can_revert());
    }
    let name_entry = updates
        .iter()
        .find(|entry| entry.field_name() == "name")
        .expect("name entry present");
    assert_eq!(name_entry.old_value(), "Housing");
    assert_eq!(name_entry.new_value(), "Housing v2");
    assert_eq!(
        name_entry.details(),
        "Field 'name' changed: 'Housing' -> 'Housing v2'"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_without_differences_stamps_updated_at_only(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("2023/001", "Housing"))
        .await
        .expect("create succeeds");

    context.clock.advance(Duration::minutes(10));
    let noop = TaskPatch::new().with_name("Housing");
    let updated = mutation
        .update(task.id(), &noop)
        .await
        .expect("update succeeds");

    assert_eq!(updated.updated_at(), test_epoch() + Duration::minutes(10));
    // Only the Created entry exists; no Updated entry was logged.
    assert_eq!(context.ledger.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_done_stamps_completion_without_extra_entry(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");

    context.clock.advance(Duration::hours(2));
    let updated = mutation
        .update(task.id(), &TaskPatch::new().with_status(TaskStatus::done()))
        .await
        .expect("update succeeds");

    assert_eq!(updated.completed_at(), Some(test_epoch() + Duration::hours(2)));

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    // Created + exactly one Updated entry for the status field; the
    // completed_at stamp is a side effect, not a diffed field.
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action(), HistoryAction::Updated);
    assert_eq!(history[0].field_name(), "status");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_task_is_not_found(context: TestContext) {
    let mutation = context.mutation();
    let missing = TaskId::new();
    let result = mutation.update(missing, &TaskPatch::new()).await;
    assert!(matches!(result, Err(TaskMutationError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_but_keeps_history(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("2023/001", "Housing"))
        .await
        .expect("create succeeds");
    mutation
        .update(task.id(), &TaskPatch::new().with_name("Housing v2"))
        .await
        .expect("update succeeds");

    let deleted = mutation.delete(task.id()).await.expect("delete succeeds");
    assert_eq!(deleted.name(), "Housing v2");

    assert!(matches!(
        mutation.delete(task.id()).await,
        Err(TaskMutationError::NotFound(_))
    ));

    // History survives as a dangling audit trail; no delete entry is
    // appended.
    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|entry| entry.action() != HistoryAction::Archived));

    // The number is free for reuse after the hard delete.
    mutation
        .create(draft("2023/001", "Replacement"))
        .await
        .expect("number reusable");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn with_actor_is_recorded_on_entries(context: TestContext) {
    let mutation = context.mutation().with_actor("operator");
    let task = mutation
        .create(draft("X-9", "Shaft"))
        .await
        .expect("create succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    assert_eq!(history[0].actor(), "operator");
}

#[rstest]
fn task_number_equality_is_exact() {
    let a = TaskNumber::new("X-1").expect("valid");
    let b = TaskNumber::new(" X-1 ").expect("valid");
    assert_eq!(a, b);
}
