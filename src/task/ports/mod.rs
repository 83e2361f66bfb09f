//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod history;
pub mod repository;
pub mod rows;
pub mod saved_filter;

pub use history::{HistoryLedger, HistoryLedgerError, HistoryLedgerResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use rows::ImportRow;
pub use saved_filter::{SavedFilterStore, SavedFilterStoreError, SavedFilterStoreResult};
