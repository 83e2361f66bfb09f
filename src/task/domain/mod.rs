//! Domain model for task lifecycle and audit history.
//!
//! The task domain models work-order records, their mutable-field table,
//! partial-update diffing, and the append-only history ledger entries
//! that make every single-field change revertible, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod field;
mod filter;
mod history;
mod ids;
mod patch;
mod saved_filter;
mod status;
mod task;

pub use error::{ParseHistoryActionError, ParseTaskFieldError, TaskDomainError};
pub use field::{FieldChange, TaskField};
pub use filter::{SortKey, SortOrder, TaskFilter, TaskSort, TaskStats};
pub use history::{HistoryAction, HistoryEntry, PersistedHistoryData, SYSTEM_ACTOR};
pub use ids::{HistoryEntryId, SavedFilterId, TaskId, TaskNumber};
pub use patch::TaskPatch;
pub use saved_filter::SavedFilter;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskDraft};
