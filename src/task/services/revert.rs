//! Revert engine: re-applies a history entry's recorded old value.
//!
//! A revert is a normal forward change that happens to restore an older
//! value: it goes through the same typed setter as updates and appends
//! its own (non-revertible) ledger entry, so the audit trail never loses
//! the value that was overwritten.

use crate::task::{
    domain::{
        HistoryEntry, HistoryEntryId, ParseTaskFieldError, SYSTEM_ACTOR, TaskDomainError,
        TaskField, TaskId,
    },
    ports::{
        HistoryLedger, HistoryLedgerError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for revert operations.
#[derive(Debug, Error)]
pub enum RevertError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The history entry is absent, belongs to another task, or is not
    /// revertible. One variant for all three keeps the outer surface
    /// from disclosing which condition failed.
    #[error("history entry {entry_id} for task {task_id} not found or cannot be reverted")]
    EntryNotRevertible {
        /// The task the caller referenced.
        task_id: TaskId,
        /// The entry the caller referenced.
        entry_id: HistoryEntryId,
    },

    /// The entry does not record a field-level change.
    #[error("history entry {0} does not reference a task field")]
    MissingFieldName(HistoryEntryId),

    /// The entry's field name is not a known mutable field.
    #[error(transparent)]
    UnknownField(#[from] ParseTaskFieldError),

    /// Domain validation failed while re-applying the stored value.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] HistoryLedgerError),
}

/// Result type for revert operations.
pub type RevertResult<T> = Result<T, RevertError>;

/// The field restored by a successful revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertOutcome {
    /// The field that was restored.
    pub field: TaskField,
    /// The serialized value the field was restored to.
    pub restored_value: String,
}

/// Revert orchestration service.
#[derive(Clone)]
pub struct RevertService<R, L, C>
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

impl<R, L, C> RevertService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new revert service recording changes as the system
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

    /// Restores the old value recorded by a revertible history entry.
    ///
    /// On success the task's field holds the entry's `old_value`,
    /// `updated_at` is stamped, and a new Reverted entry records the
    /// value that was just overwritten. The task is never mutated on any
    /// failure path.
    ///
    /// # Errors
    ///
    /// Returns [`RevertError::TaskNotFound`] or
    /// [`RevertError::EntryNotRevertible`] for missing references, and
    /// [`RevertError::MissingFieldName`] or [`RevertError::UnknownField`]
    /// when the entry does not map onto a mutable field of the task.
    pub async fn revert(
        &self,
        task_id: TaskId,
        entry_id: HistoryEntryId,
    ) -> RevertResult<RevertOutcome> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(RevertError::TaskNotFound(task_id))?;

        let entry = self
            .ledger
            .find(task_id, entry_id)
            .await?
            .filter(HistoryEntry::can_revert)
            .ok_or(RevertError::EntryNotRevertible { task_id, entry_id })?;

        if entry.field_name().is_empty() {
            return Err(RevertError::MissingFieldName(entry_id));
        }
        let field = TaskField::try_from(entry.field_name())?;

        let previous_value = field.current_value(&task);
        task.set_field(field, entry.old_value(), &*self.clock)?;
        task.touch(&*self.clock);
        self.repository.update(&task).await?;

        let reverted = HistoryEntry::reverted(
            task_id,
            field,
            &previous_value,
            entry.old_value(),
            &self.actor,
            &*self.clock,
        );
        self.ledger.append(&reverted).await?;

        Ok(RevertOutcome {
            field,
            restored_value: entry.old_value().to_owned(),
        })
    }
}
