//! Repository port for task persistence, lookup, and archival commits.

use crate::task::domain::{Task, TaskFilter, TaskId, TaskNumber, TaskSort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations own the canonical current state of every task and
/// enforce work-order number uniqueness across active and archived tasks
/// alike. All time-dependent predicates take the reference instant as a
/// parameter; repositories never read a clock.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateNumber`] when any stored
    /// task, archived ones included, already carries the number.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by work-order number, archived tasks included.
    ///
    /// Returns `None` when no task carries the number.
    async fn find_by_number(&self, number: &TaskNumber) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching `filter`, ordered by `sort`. The overdue
    /// predicate is judged as of `now`.
    async fn list(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns the archival scan snapshot: active tasks that are done
    /// and completed before `cutoff`.
    async fn archival_candidates(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Conditionally archives a task: the flag flips only if the task
    /// still exists, still has done status, and is not yet archived.
    /// Returns whether this call archived it.
    ///
    /// The condition is re-checked at commit so a task whose status moved
    /// away from done after the candidate scan is left untouched.
    async fn archive(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same work-order number already exists.
    #[error("duplicate task number: {0}")]
    DuplicateNumber(TaskNumber),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
