//! Error types for reception domain validation.

use thiserror::Error;

/// Errors returned while constructing reception records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReceptionDomainError {
    /// A required field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}
