//! Read-side service: lookups, listings, history, and statistics.

use crate::task::{
    domain::{HistoryEntry, Task, TaskFilter, TaskId, TaskSort, TaskStats},
    ports::{HistoryLedger, HistoryLedgerError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task queries.
#[derive(Debug, Error)]
pub enum TaskQueryError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] HistoryLedgerError),
}

/// Result type for task query operations.
pub type TaskQueryResult<T> = Result<T, TaskQueryError>;

/// Read-side orchestration over the task store and history ledger.
#[derive(Clone)]
pub struct TaskQueryService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<R, L, C> TaskQueryService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            repository,
            ledger,
            clock,
        }
    }

    /// Retrieves one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskQueryResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskQueryError::NotFound(id))
    }

    /// Lists tasks matching `filter`, ordered by `sort`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when the lookup fails.
    pub async fn list(&self, filter: &TaskFilter, sort: TaskSort) -> TaskQueryResult<Vec<Task>> {
        let now = self.clock.utc();
        Ok(self.repository.list(filter, sort, now).await?)
    }

    /// Returns the history of one task, newest first.
    ///
    /// History of deleted tasks is reachable only through the ledger port
    /// directly; this surface mirrors the outer API and insists the task
    /// still exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when the task does not exist.
    pub async fn history(&self, task_id: TaskId) -> TaskQueryResult<Vec<HistoryEntry>> {
        if self.repository.find_by_id(task_id).await?.is_none() {
            return Err(TaskQueryError::NotFound(task_id));
        }
        Ok(self.ledger.for_task(task_id).await?)
    }

    /// Computes aggregate counters over active tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when the scan fails.
    pub async fn stats(&self) -> TaskQueryResult<TaskStats> {
        let now = self.clock.utc();
        let active = self
            .repository
            .list(&TaskFilter::active(), TaskSort::default(), now)
            .await?;
        Ok(TaskStats::collect(&active, now))
    }
}
