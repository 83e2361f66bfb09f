//! Service tests for the revert engine.

use super::{TestContext, draft};
use crate::task::domain::{HistoryAction, HistoryEntryId, TaskField, TaskId, TaskPatch};
use crate::task::ports::{HistoryLedger, TaskRepository};
use crate::task::services::RevertError;
use rstest::{fixture, rstest};

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_restores_old_value_and_logs_forward_entry(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    mutation
        .update(task.id(), &TaskPatch::new().with_name("Housing v2"))
        .await
        .expect("update succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let update_entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Updated)
        .expect("update entry present");

    let outcome = context
        .revert()
        .revert(task.id(), update_entry.id())
        .await
        .expect("revert succeeds");
    assert_eq!(outcome.field, TaskField::Name);
    assert_eq!(outcome.restored_value, "Housing");

    let reverted_task = context
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task present");
    assert_eq!(reverted_task.name(), "Housing");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let revert_entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Reverted)
        .expect("revert entry present");
    assert_eq!(revert_entry.field_name(), "name");
    assert_eq!(revert_entry.old_value(), "Housing v2");
    assert_eq!(revert_entry.new_value(), "Housing");
    assert!(!revert_entry.can_revert());
    assert_eq!(
        revert_entry.details(),
        "Reverted field 'name': 'Housing v2' -> 'Housing'"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_restores_absent_optional_value(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    mutation
        .update(task.id(), &TaskPatch::new().with_responsible("petrov"))
        .await
        .expect("update succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Updated)
        .expect("update entry present");
    assert_eq!(entry.old_value(), "");

    context
        .revert()
        .revert(task.id(), entry.id())
        .await
        .expect("revert succeeds");
    let task = context
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task present");
    assert_eq!(task.responsible(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_rejects_non_revertible_entry_without_mutation(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let created_entry = &history[0];
    assert!(!created_entry.can_revert());

    let before = context
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task present");
    let result = context.revert().revert(task.id(), created_entry.id()).await;
    assert!(matches!(
        result,
        Err(RevertError::EntryNotRevertible { .. })
    ));

    let after = context
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task present");
    assert_eq!(before, after);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_rejects_unknown_entry_and_unknown_task(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");

    let result = context
        .revert()
        .revert(task.id(), HistoryEntryId::new())
        .await;
    assert!(matches!(
        result,
        Err(RevertError::EntryNotRevertible { .. })
    ));

    let result = context
        .revert()
        .revert(TaskId::new(), HistoryEntryId::new())
        .await;
    assert!(matches!(result, Err(RevertError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_rejects_entry_of_other_task(context: TestContext) {
    let mutation = context.mutation();
    let first = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    let second = mutation
        .create(draft("X-2", "Cover"))
        .await
        .expect("create succeeds");
    mutation
        .update(first.id(), &TaskPatch::new().with_name("Housing v2"))
        .await
        .expect("update succeeds");

    let history = context
        .ledger
        .for_task(first.id())
        .await
        .expect("history readable");
    let entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Updated)
        .expect("update entry present");

    // The entry exists but belongs to the first task.
    let result = context.revert().revert(second.id(), entry.id()).await;
    assert!(matches!(
        result,
        Err(RevertError::EntryNotRevertible { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reverts_are_not_themselves_revertible(context: TestContext) {
    let mutation = context.mutation();
    let task = mutation
        .create(draft("X-1", "Housing"))
        .await
        .expect("create succeeds");
    mutation
        .update(task.id(), &TaskPatch::new().with_name("Housing v2"))
        .await
        .expect("update succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Updated)
        .expect("update entry present");
    context
        .revert()
        .revert(task.id(), entry.id())
        .await
        .expect("revert succeeds");

    let history = context
        .ledger
        .for_task(task.id())
        .await
        .expect("history readable");
    let revert_entry = history
        .iter()
        .find(|entry| entry.action() == HistoryAction::Reverted)
        .expect("revert entry present");
    let result = context.revert().revert(task.id(), revert_entry.id()).await;
    assert!(matches!(
        result,
        Err(RevertError::EntryNotRevertible { .. })
    ));
}
