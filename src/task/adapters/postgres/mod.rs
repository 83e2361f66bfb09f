//! `PostgreSQL` adapters for task lifecycle persistence.

mod history;
mod models;
mod repository;
mod saved_filter;
mod schema;

pub use history::PostgresHistoryLedger;
pub use repository::{PostgresTaskRepository, TaskPgPool};
pub use saved_filter::PostgresSavedFilterStore;
