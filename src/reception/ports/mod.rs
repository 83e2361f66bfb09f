//! Port contracts for goods reception.

pub mod repository;

pub use repository::{ReceptionRepository, ReceptionRepositoryError, ReceptionRepositoryResult};
