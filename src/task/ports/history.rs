//! Ledger port for append-only task history.

use crate::task::domain::{HistoryEntry, HistoryEntryId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history ledger operations.
pub type HistoryLedgerResult<T> = Result<T, HistoryLedgerError>;

/// Append-only history persistence contract.
///
/// Entries are immutable once appended; there is no update or delete.
/// `task_id` is a lookup key, not a foreign key with ownership: entries
/// referencing deleted tasks remain readable for audit.
#[async_trait]
pub trait HistoryLedger: Send + Sync {
    /// Appends one entry. Pure insert; no validation beyond the entry's
    /// own required fields.
    async fn append(&self, entry: &HistoryEntry) -> HistoryLedgerResult<()>;

    /// Returns all entries for a task, newest first.
    async fn for_task(&self, task_id: TaskId) -> HistoryLedgerResult<Vec<HistoryEntry>>;

    /// Finds one entry by task and entry identifier.
    ///
    /// Returns `None` when the entry does not exist or belongs to a
    /// different task.
    async fn find(
        &self,
        task_id: TaskId,
        entry_id: HistoryEntryId,
    ) -> HistoryLedgerResult<Option<HistoryEntry>>;
}

/// Errors returned by history ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryLedgerError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
