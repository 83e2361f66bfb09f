//! Batch import: creates tasks from an external row source.

use crate::task::{
    domain::{
        HistoryEntry, SYSTEM_ACTOR, Task, TaskDomainError, TaskDraft, TaskNumber, TaskStatus,
    },
    ports::{
        HistoryLedger, HistoryLedgerError, ImportRow, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Column holding the work-order number.
const NUMBER_COLUMN: &str = "number";
/// Column holding the task name.
const NAME_COLUMN: &str = "name";
/// Column holding the description.
const DESCRIPTION_COLUMN: &str = "description";
/// Column holding the initial status.
const STATUS_COLUMN: &str = "status";

/// Why a single row was skipped.
///
/// Row-level failures never escape the batch; they are rendered into the
/// outcome's error strings.
#[derive(Debug, Error)]
enum ImportRowError {
    /// The row's number collides with an existing task.
    #[error("task with number '{0}' already exists")]
    DuplicateNumber(TaskNumber),

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

/// Outcome envelope for an import batch.
///
/// Partial success is the normal case: clean rows are committed even
/// when siblings are skipped, and each skipped row contributes one
/// operator-facing error string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Number of tasks created.
    pub created: usize,
    /// One message per skipped row, referencing the spreadsheet row
    /// number (position + 2, accounting for the header row).
    pub errors: Vec<String>,
}

/// Batch import service.
#[derive(Clone)]
pub struct TaskImportService<R, L, C>
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

impl<R, L, C> TaskImportService<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new import service recording changes as the system
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

    /// Imports a finite batch of candidate rows.
    ///
    /// Missing columns default: status to in-development, description to
    /// empty, and a missing or blank number is synthesized from the row
    /// position as `AUTO-{position}` so re-running the same sheet maps
    /// rows to the same numbers. Each created task gets one Imported
    /// ledger entry naming `source`.
    pub async fn import<I>(&self, rows: I, source: &str) -> ImportOutcome
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let mut outcome = ImportOutcome::default();
        for (position, row) in rows.into_iter().enumerate() {
            match self.import_row(position, &row, source).await {
                Ok(()) => outcome.created += 1,
                Err(err) => {
                    let row_number = position + 2;
                    outcome.errors.push(format!("row {row_number}: {err}"));
                }
            }
        }
        tracing::info!(
            created = outcome.created,
            skipped = outcome.errors.len(),
            source,
            "import batch complete"
        );
        outcome
    }

    async fn import_row(
        &self,
        position: usize,
        row: &ImportRow,
        source: &str,
    ) -> Result<(), ImportRowError> {
        let number = match row.get(NUMBER_COLUMN).map(str::trim) {
            Some(value) if !value.is_empty() => TaskNumber::new(value)?,
            _ => TaskNumber::new(format!("AUTO-{position}"))?,
        };

        if self.repository.find_by_number(&number).await?.is_some() {
            return Err(ImportRowError::DuplicateNumber(number));
        }

        let mut draft = TaskDraft::new(number.clone(), row.get(NAME_COLUMN).unwrap_or_default())
            .with_description(row.get(DESCRIPTION_COLUMN).unwrap_or_default());
        if let Some(status) = row.get(STATUS_COLUMN).map(str::trim) {
            if !status.is_empty() {
                draft = draft.with_status(TaskStatus::new(status));
            }
        }

        let task = Task::new(draft, &*self.clock);
        self.repository.insert(&task).await.map_err(|err| match err {
            TaskRepositoryError::DuplicateNumber(colliding) => {
                ImportRowError::DuplicateNumber(colliding)
            }
            other => ImportRowError::Repository(other),
        })?;

        let entry = HistoryEntry::imported(&task, source, &self.actor, &*self.clock);
        self.ledger.append(&entry).await?;
        Ok(())
    }
}
