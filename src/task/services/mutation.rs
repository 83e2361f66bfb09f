//! Mutation engine: create, update, bulk update, and delete.
//!
//! Every write flows through here so diffing and history logging cannot
//! drift apart: changed fields are detected against the static field
//! table, applied through the task's typed setters, and logged to the
//! ledger in the same pass.

use crate::task::{
    domain::{
        HistoryEntry, SYSTEM_ACTOR, Task, TaskDomainError, TaskDraft, TaskId, TaskNumber,
        TaskPatch,
    },
    ports::{
        HistoryLedger, HistoryLedgerError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task mutations.
#[derive(Debug, Error)]
pub enum TaskMutationError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task with the same work-order number already exists.
    #[error("task with number '{0}' already exists")]
    DuplicateNumber(TaskNumber),

    /// A bulk operation was called with no ids.
    #[error("no task ids supplied")]
    EmptyIdList,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] HistoryLedgerError),
}

/// Result type for task mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Outcome envelope for a bulk update.
///
/// Bulk operations report per-item results instead of failing as a
/// whole: missing ids are skipped silently, unchanged tasks are counted
/// as not updated, and item-level storage failures land in `errors`
/// without aborting siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUpdateOutcome {
    /// Number of tasks that had at least one field changed.
    pub updated_count: usize,
    /// One message per task whose update failed mid-flight.
    pub errors: Vec<String>,
}

/// Outcome envelope for a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    /// Number of tasks deleted.
    pub deleted_count: usize,
    /// Names of the deleted tasks, in processing order.
    pub deleted_names: Vec<String>,
    /// One message per task whose deletion failed mid-flight.
    pub errors: Vec<String>,
}

/// Task mutation orchestration service.
#[derive(Clone)]
pub struct TaskMutationService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<C>,
    actor: String,
}

impl<R, L, C> TaskMutationService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new mutation service recording changes as the system
    /// actor.
    #[must_use]
    pub fn new(repository: Arc<R>, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            repository,
            ledger,
            clock,
            actor: SYSTEM_ACTOR.to_owned(),
        }
    }

    /// Sets the actor recorded on history entries this service writes.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Creates a new task and logs a Created entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::DuplicateNumber`] when the work-order
    /// number is already taken; nothing is written in that case.
    pub async fn create(&self, draft: TaskDraft) -> TaskMutationResult<Task> {
        // The pre-check yields the semantic error; the store's uniqueness
        // guarantee still backs it in the window between check and insert.
        if self
            .repository
            .find_by_number(draft.number())
            .await?
            .is_some()
        {
            return Err(TaskMutationError::DuplicateNumber(draft.number().clone()));
        }

        let task = Task::new(draft, &*self.clock);
        self.repository
            .insert(&task)
            .await
            .map_err(duplicate_as_conflict)?;
        let entry = HistoryEntry::created(&task, &self.actor, &*self.clock);
        self.ledger.append(&entry).await?;
        Ok(task)
    }

    /// Applies a partial update, logging one Updated entry per changed
    /// field.
    ///
    /// `updated_at` is stamped on every successful call, whether or not
    /// any field actually changed. A status transition into done stamps
    /// `completed_at` as a side effect without its own ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] when the task does not
    /// exist.
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskMutationResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskMutationError::NotFound(id))?;

        let changes = patch.changes_against(&task);
        for change in &changes {
            task.set_field(change.field, &change.new_value, &*self.clock)?;
        }
        task.touch(&*self.clock);
        self.repository.update(&task).await?;

        for change in &changes {
            let entry = HistoryEntry::field_updated(task.id(), change, &self.actor, &*self.clock);
            self.ledger.append(&entry).await?;
        }
        Ok(task)
    }

    /// Applies the same patch to many tasks independently.
    ///
    /// Each task with at least one changed field gets exactly one
    /// consolidated BulkUpdated entry. Missing ids are skipped silently;
    /// the outcome reports how many tasks actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::EmptyIdList`] when `ids` is empty.
    pub async fn bulk_update(
        &self,
        ids: &[TaskId],
        patch: &TaskPatch,
    ) -> TaskMutationResult<BulkUpdateOutcome> {
        if ids.is_empty() {
            return Err(TaskMutationError::EmptyIdList);
        }

        let mut outcome = BulkUpdateOutcome::default();
        for &id in ids {
            match self.bulk_update_one(id, patch).await {
                Ok(true) => outcome.updated_count += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(task_id = %id, error = %err, "bulk update item failed");
                    outcome.errors.push(format!("task {id}: {err}"));
                }
            }
        }
        Ok(outcome)
    }

    /// Hard-deletes a task and returns its final state.
    ///
    /// No ledger entry is written; existing history rows keep referencing
    /// the removed id as a dangling audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] when the task does not
    /// exist.
    pub async fn delete(&self, id: TaskId) -> TaskMutationResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskMutationError::NotFound(id))?;
        self.repository.delete(id).await?;
        Ok(task)
    }

    /// Hard-deletes many tasks, skipping missing ids silently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::EmptyIdList`] when `ids` is empty.
    pub async fn bulk_delete(&self, ids: &[TaskId]) -> TaskMutationResult<BulkDeleteOutcome> {
        if ids.is_empty() {
            return Err(TaskMutationError::EmptyIdList);
        }

        let mut outcome = BulkDeleteOutcome::default();
        for &id in ids {
            match self.bulk_delete_one(id).await {
                Ok(Some(name)) => {
                    outcome.deleted_count += 1;
                    outcome.deleted_names.push(name);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(task_id = %id, error = %err, "bulk delete item failed");
                    outcome.errors.push(format!("task {id}: {err}"));
                }
            }
        }
        Ok(outcome)
    }

    /// Updates one task of a bulk batch; `Ok(true)` means it changed.
    async fn bulk_update_one(&self, id: TaskId, patch: &TaskPatch) -> TaskMutationResult<bool> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };

        let changes = patch.changes_against(&task);
        if changes.is_empty() {
            return Ok(false);
        }
        for change in &changes {
            task.set_field(change.field, &change.new_value, &*self.clock)?;
        }
        task.touch(&*self.clock);
        self.repository.update(&task).await?;

        let entry = HistoryEntry::bulk_updated(task.id(), &changes, &self.actor, &*self.clock);
        self.ledger.append(&entry).await?;
        Ok(true)
    }

    /// Deletes one task of a bulk batch; `Ok(Some(name))` means it was
    /// removed.
    async fn bulk_delete_one(&self, id: TaskId) -> TaskMutationResult<Option<String>> {
        let Some(task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        self.repository.delete(id).await?;
        Ok(Some(task.name().to_owned()))
    }
}

/// Maps a repository duplicate into the service-level conflict.
fn duplicate_as_conflict(err: TaskRepositoryError) -> TaskMutationError {
    match err {
        TaskRepositoryError::DuplicateNumber(number) => {
            TaskMutationError::DuplicateNumber(number)
        }
        other => TaskMutationError::Repository(other),
    }
}
