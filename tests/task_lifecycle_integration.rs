//! Behavioural integration tests for the task lifecycle engine.
//!
//! These tests exercise the services against the in-memory adapters in
//! realistic end-to-end flows: create, mutate, revert, import, and
//! archive, verifying the audit ledger after every step.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use eyre::Result;
use mockable::Clock;
use shopfloor::task::{
    adapters::memory::{InMemoryHistoryLedger, InMemoryTaskRepository},
    domain::{HistoryAction, TaskDraft, TaskFilter, TaskNumber, TaskPatch, TaskSort, TaskStatus},
    ports::{HistoryLedger, ImportRow},
    services::{
        ArchivalScheduler, RevertService, TaskImportService, TaskMutationService,
        TaskQueryService,
    },
};
use std::sync::{Arc, RwLock};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Test clock pinned to an explicit instant, advanced manually.
struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    fn start() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("valid test epoch");
        Self {
            now: RwLock::new(epoch),
        }
    }

    fn advance(&self, delta: Duration) {
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

/// Full service wiring over shared in-memory adapters.
struct Engine {
    repository: Arc<InMemoryTaskRepository>,
    ledger: Arc<InMemoryHistoryLedger>,
    clock: Arc<FixedClock>,
}

impl Engine {
    fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            ledger: Arc::new(InMemoryHistoryLedger::new()),
            clock: Arc::new(FixedClock::start()),
        }
    }

    fn mutation(
        &self,
    ) -> TaskMutationService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskMutationService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
        .with_actor("operator")
    }

    fn query(
        &self,
    ) -> TaskQueryService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskQueryService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    fn revert(
        &self,
    ) -> RevertService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        RevertService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
        .with_actor("operator")
    }

    fn archival(
        &self,
    ) -> ArchivalScheduler<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        ArchivalScheduler::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }

    fn import(
        &self,
    ) -> TaskImportService<InMemoryTaskRepository, InMemoryHistoryLedger, FixedClock> {
        TaskImportService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.ledger),
            Arc::clone(&self.clock),
        )
    }
}

fn draft(number: &str, name: &str) -> Result<TaskDraft> {
    Ok(TaskDraft::new(TaskNumber::new(number)?, name))
}

/// A work order travels from creation through completion, cooldown, and
/// archival, leaving a complete audit trail.
#[test]
fn work_order_lifecycle_ends_in_the_archive() -> Result<()> {
    let rt = test_runtime();
    let engine = Engine::new();
    let mutation = engine.mutation();

    let task = rt.block_on(mutation.create(draft("2024/007", "Spindle housing")?))?;

    // Work progresses through two status changes.
    engine.clock.advance(Duration::hours(3));
    rt.block_on(mutation.update(
        task.id(),
        &TaskPatch::new().with_status(TaskStatus::new("in-progress")),
    ))?;
    engine.clock.advance(Duration::days(2));
    let completed = rt.block_on(mutation.update(
        task.id(),
        &TaskPatch::new().with_status(TaskStatus::done()),
    ))?;
    let completion_time = completed.completed_at().expect("completion stamped");
    assert_eq!(completion_time, engine.clock.utc());

    // Inside the cooldown nothing is archived.
    engine.clock.advance(Duration::days(3));
    assert_eq!(rt.block_on(engine.archival().run())?, 0);

    // Past the cooldown the task moves to the archive exactly once.
    engine.clock.advance(Duration::days(5));
    assert_eq!(rt.block_on(engine.archival().run())?, 1);
    assert_eq!(rt.block_on(engine.archival().run())?, 0);

    let archived = rt.block_on(engine.query().get(task.id()))?;
    assert!(archived.archived());
    assert_eq!(archived.completed_at(), Some(completion_time));

    let history = rt.block_on(engine.query().history(task.id()))?;
    let actions: Vec<HistoryAction> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Archived,
            HistoryAction::Updated,
            HistoryAction::Updated,
            HistoryAction::Created,
        ]
    );
    Ok(())
}

/// A mistaken edit is rolled back through the ledger, and the rollback
/// itself is recorded as a forward change.
#[test]
fn mistaken_edit_is_reverted_through_the_ledger() -> Result<()> {
    let rt = test_runtime();
    let engine = Engine::new();
    let mutation = engine.mutation();

    let task = rt.block_on(mutation.create(draft("2024/011", "Gearbox cover")?))?;
    rt.block_on(mutation.update(
        task.id(),
        &TaskPatch::new().with_responsible("petrov").with_priority("low"),
    ))?;

    let history = rt.block_on(engine.query().history(task.id()))?;
    let priority_entry = history
        .iter()
        .find(|entry| entry.field_name() == "priority")
        .expect("priority entry present");

    let outcome = rt.block_on(engine.revert().revert(task.id(), priority_entry.id()))?;
    assert_eq!(outcome.restored_value, "");

    let current = rt.block_on(engine.query().get(task.id()))?;
    assert_eq!(current.priority(), None);
    assert_eq!(current.responsible(), Some("petrov"));

    let history = rt.block_on(engine.query().history(task.id()))?;
    assert_eq!(history[0].action(), HistoryAction::Reverted);
    assert_eq!(history[0].actor(), "operator");
    assert!(!history[0].can_revert());
    Ok(())
}

/// A spreadsheet batch lands with one collision; clean rows commit and
/// the collision is reported per row.
#[test]
fn import_batch_commits_partially_and_reports_collisions() -> Result<()> {
    let rt = test_runtime();
    let engine = Engine::new();
    rt.block_on(engine.mutation().create(draft("2024/001", "Base plate")?))?;

    let rows = vec![
        ImportRow::new()
            .with_column("Number", "2024/001")
            .with_column("Name", "Colliding base plate"),
        ImportRow::new()
            .with_column("Number", "2024/002")
            .with_column("Name", "Clamp")
            .with_column("Status", "prepared"),
        ImportRow::new().with_column("Name", "Unnumbered part"),
    ];
    let outcome = rt.block_on(engine.import().import(rows, "march-orders.xlsx"));

    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("row 2:"));

    let listed = rt.block_on(
        engine
            .query()
            .list(&TaskFilter::active(), TaskSort::default()),
    )?;
    assert_eq!(listed.len(), 3);
    let synthesized = listed
        .iter()
        .find(|task| task.name() == "Unnumbered part")
        .expect("synthesized-number task present");
    assert_eq!(synthesized.number().as_str(), "AUTO-2");

    let imported_entries = rt.block_on(engine.ledger.for_task(synthesized.id()))?;
    assert_eq!(imported_entries.len(), 1);
    assert_eq!(imported_entries[0].action(), HistoryAction::Imported);
    Ok(())
}

/// Bulk completion stamps every affected task and writes one
/// consolidated entry per task.
#[test]
fn bulk_completion_stamps_and_logs_each_task_once() -> Result<()> {
    let rt = test_runtime();
    let engine = Engine::new();
    let mutation = engine.mutation();

    let first = rt.block_on(mutation.create(draft("2024/021", "Pin")?))?;
    let second = rt.block_on(mutation.create(draft("2024/022", "Sleeve")?))?;

    engine.clock.advance(Duration::hours(1));
    let outcome = rt.block_on(mutation.bulk_update(
        &[first.id(), second.id()],
        &TaskPatch::new().with_status(TaskStatus::done()),
    ))?;
    assert_eq!(outcome.updated_count, 2);

    for id in [first.id(), second.id()] {
        let task = rt.block_on(engine.query().get(id))?;
        assert_eq!(task.completed_at(), Some(engine.clock.utc()));

        let history = rt.block_on(engine.query().history(id))?;
        assert_eq!(history[0].action(), HistoryAction::BulkUpdated);
    }
    Ok(())
}
