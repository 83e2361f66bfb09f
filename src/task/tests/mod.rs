//! Unit tests for the task module.

mod bulk_tests;
mod import_tests;
mod mutation_tests;
mod revert_tests;

use crate::task::adapters::memory::{InMemoryHistoryLedger, InMemoryTaskRepository};
use crate::task::domain::{TaskDraft, TaskNumber};
use crate::task::services::{
    ArchivalScheduler, RevertService, TaskImportService, TaskMutationService, TaskQueryService,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Test clock pinned to an explicit instant, advanced manually.
pub(crate) struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock at the shared test epoch.
    pub(crate) fn start() -> Self {
        Self {
            now: RwLock::new(test_epoch()),
        }
    }

    /// Moves the clock forward.
    pub(crate) fn advance(&self, delta: Duration) {
        let mut now = self.now.write().expect("clock lock");
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock")
    }
}

/// The instant all fixed-clock tests start from.
pub(crate) fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
        .single()
        .expect("valid test epoch")
}

/// Shared in-memory wiring for service tests.
pub(crate) struct TestContext {
    pub(crate) repository: Arc<InMemoryTaskRepository>,
    pub(crate) ledger: Arc<InMemoryHistoryLedger>,
    pub(crate) clock: Arc<FixedClock>,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            ledger: Arc::new(InMemoryHistoryLedger::new()),
            clock: Arc::new(FixedClock::start()),
        }
    }

    pub(crate) fn mutation(
        &self,
    ) -> TaskMutationService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskMutationService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn query(
        &self,
    ) -> TaskQueryService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskQueryService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn revert(
        &self,
    ) -> RevertService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        RevertService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn archival(
        &self,
    ) -> ArchivalScheduler<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        ArchivalScheduler::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn import(
        &self,
    ) -> TaskImportService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskImportService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }
}

/// Builds a draft with a validated number.
pub(crate) fn draft(number: &str, name: &str) -> TaskDraft {
    TaskDraft::new(TaskNumber::new(number).expect("valid task number"), name)
}
