//! In-memory history ledger.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{HistoryEntry, HistoryEntryId, TaskId},
    ports::{HistoryLedger, HistoryLedgerError, HistoryLedgerResult},
};

/// Thread-safe in-memory append-only ledger.
///
/// Entries are kept in insertion order; per-task reads walk the log
/// backwards, so newest-first ordering is stable even when a fixed test
/// clock hands several entries the same timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryLedger {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl InMemoryHistoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries across all tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` when no entry has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned<T>(err: &std::sync::PoisonError<T>) -> HistoryLedgerError {
    HistoryLedgerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl HistoryLedger for InMemoryHistoryLedger {
    async fn append(&self, entry: &HistoryEntry) -> HistoryLedgerResult<()> {
        let mut entries = self.entries.write().map_err(|err| lock_poisoned(&err))?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn for_task(&self, task_id: TaskId) -> HistoryLedgerResult<Vec<HistoryEntry>> {
        let entries = self.entries.read().map_err(|err| lock_poisoned(&err))?;
        Ok(entries
            .iter()
            .rev()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        task_id: TaskId,
        entry_id: HistoryEntryId,
    ) -> HistoryLedgerResult<Option<HistoryEntry>> {
        let entries = self.entries.read().map_err(|err| lock_poisoned(&err))?;
        Ok(entries
            .iter()
            .find(|entry| entry.task_id() == task_id && entry.id() == entry_id)
            .cloned())
    }
}
