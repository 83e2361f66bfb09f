//! `PostgreSQL` adapters for reception persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresReceptionRepository, ReceptionPgPool};
