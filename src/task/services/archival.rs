//! Archival scheduler: moves cooled-down completed tasks to the archive.

use crate::task::{
    domain::{HistoryEntry, SYSTEM_ACTOR, Task},
    ports::{
        HistoryLedger, HistoryLedgerError, TaskRepository, TaskRepositoryError,
    },
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default archival cooldown in calendar days.
///
/// The business rule is "5 working days after completion"; 7 calendar
/// days is the standing approximation that accounts for weekends. Use
/// [`ArchivalScheduler::with_cooldown`] to override.
pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

/// Errors for a whole archival pass.
///
/// Per-task failures inside a pass are logged and skipped; only failures
/// of the candidate scan itself abort the run.
#[derive(Debug, Error)]
pub enum ArchivalError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] HistoryLedgerError),
}

/// Result type for archival operations.
pub type ArchivalResult<T> = Result<T, ArchivalError>;

/// Periodic/on-demand archiver for completed tasks.
#[derive(Clone)]
pub struct ArchivalScheduler<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<C>,
    cooldown: Duration,
    actor: String,
}

impl<R, L, C> ArchivalScheduler<R, L, C>
where
    R: TaskRepository,
    L: HistoryLedger,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler with the default cooldown.
    #[must_use]
    pub fn new(repository: Arc<R>, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            repository,
            ledger,
            clock,
            cooldown: Duration::days(DEFAULT_COOLDOWN_DAYS),
            actor: SYSTEM_ACTOR.to_owned(),
        }
    }

    /// Overrides the archival cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Runs one archival pass and returns how many tasks it archived.
    ///
    /// Candidacy is judged by the scan snapshot and re-verified by the
    /// repository's conditional archive commit, so tasks whose status
    /// left done in between are skipped rather than wrongly archived.
    /// Re-running immediately archives zero additional tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::Repository`] when the candidate scan
    /// fails. Failures on individual tasks are logged at warn level and
    /// do not abort the pass.
    pub async fn run(&self) -> ArchivalResult<u64> {
        let cutoff = self.clock.utc() - self.cooldown;
        let candidates = self.repository.archival_candidates(cutoff).await?;

        let mut archived = 0u64;
        for task in &candidates {
            match self.archive_one(task).await {
                Ok(true) => archived += 1,
                Ok(false) => {
                    tracing::debug!(task_id = %task.id(), "task no longer eligible for archival");
                }
                Err(err) => {
                    tracing::warn!(task_id = %task.id(), error = %err, "failed to archive task");
                }
            }
        }
        tracing::info!(archived, candidates = candidates.len(), "archival pass complete");
        Ok(archived)
    }

    /// Spawns a background loop running [`ArchivalScheduler::run`] on a
    /// fixed interval until the returned handle is aborted or dropped
    /// with the runtime.
    #[must_use]
    pub fn spawn_periodic(self, interval: std::time::Duration) -> tokio::task::JoinHandle<()>
    where
        R: 'static,
        L: 'static,
        C: 'static,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = self.run().await {
                    tracing::warn!(error = %err, "scheduled archival pass failed");
                }
            }
        })
    }

    async fn archive_one(&self, task: &Task) -> ArchivalResult<bool> {
        if !self.repository.archive(task.id()).await? {
            return Ok(false);
        }
        let entry = HistoryEntry::archived(task, &self.actor, &*self.clock);
        self.ledger.append(&entry).await?;
        Ok(true)
    }
}
