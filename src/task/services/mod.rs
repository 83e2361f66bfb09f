//! Orchestration services for task lifecycle management.
//!
//! Each service is constructed with `Arc`-shared port implementations
//! and an injected clock; none of them holds ambient global state.

pub mod archival;
pub mod filters;
pub mod import;
pub mod mutation;
pub mod query;
pub mod revert;

pub use archival::{ArchivalError, ArchivalResult, ArchivalScheduler, DEFAULT_COOLDOWN_DAYS};
pub use filters::{SavedFilterError, SavedFilterResult, SavedFilterService};
pub use import::{ImportOutcome, TaskImportService};
pub use mutation::{
    BulkDeleteOutcome, BulkUpdateOutcome, TaskMutationError, TaskMutationResult,
    TaskMutationService,
};
pub use query::{TaskQueryError, TaskQueryResult, TaskQueryService};
pub use revert::{RevertError, RevertOutcome, RevertResult, RevertService};
