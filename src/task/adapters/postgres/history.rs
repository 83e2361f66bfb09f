//! `PostgreSQL` ledger implementation for task history.

use super::{
    models::{HistoryRow, NewHistoryRow},
    repository::TaskPgPool,
    schema::task_history,
};
use crate::task::{
    domain::{
        HistoryAction, HistoryEntry, HistoryEntryId, PersistedHistoryData, TaskId,
    },
    ports::{HistoryLedger, HistoryLedgerError, HistoryLedgerResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed append-only history ledger.
#[derive(Debug, Clone)]
pub struct PostgresHistoryLedger {
    pool: TaskPgPool,
}

impl PostgresHistoryLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> HistoryLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HistoryLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HistoryLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(HistoryLedgerError::persistence)?
    }
}

#[async_trait]
impl HistoryLedger for PostgresHistoryLedger {
    async fn append(&self, entry: &HistoryEntry) -> HistoryLedgerResult<()> {
        let new_row = to_new_row(entry);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_history::table)
                .values(&new_row)
                .execute(connection)
                .map_err(HistoryLedgerError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn for_task(&self, task_id: TaskId) -> HistoryLedgerResult<Vec<HistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order(task_history::timestamp.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(HistoryLedgerError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn find(
        &self,
        task_id: TaskId,
        entry_id: HistoryEntryId,
    ) -> HistoryLedgerResult<Option<HistoryEntry>> {
        self.run_blocking(move |connection| {
            let row = task_history::table
                .filter(task_history::id.eq(entry_id.into_inner()))
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .select(HistoryRow::as_select())
                .first::<HistoryRow>(connection)
                .optional()
                .map_err(HistoryLedgerError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }
}

fn to_new_row(entry: &HistoryEntry) -> NewHistoryRow {
    NewHistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        action: entry.action().as_str().to_owned(),
        details: entry.details().to_owned(),
        field_name: entry.field_name().to_owned(),
        old_value: entry.old_value().to_owned(),
        new_value: entry.new_value().to_owned(),
        actor: entry.actor().to_owned(),
        timestamp: entry.timestamp(),
        can_revert: entry.can_revert(),
    }
}

fn row_to_entry(row: HistoryRow) -> HistoryLedgerResult<HistoryEntry> {
    let action =
        HistoryAction::try_from(row.action.as_str()).map_err(HistoryLedgerError::persistence)?;
    let data = PersistedHistoryData {
        id: HistoryEntryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        action,
        details: row.details,
        field_name: row.field_name,
        old_value: row.old_value,
        new_value: row.new_value,
        actor: row.actor,
        timestamp: row.timestamp,
        can_revert: row.can_revert,
    };
    Ok(HistoryEntry::from_persisted(data))
}
