//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task number is empty after trimming.
    #[error("task number must not be empty")]
    EmptyTaskNumber,

    /// The saved-filter name is empty after trimming.
    #[error("filter name must not be empty")]
    EmptyFilterName,

    /// A due-date value did not parse as an RFC 3339 timestamp.
    #[error("invalid due date '{0}', expected an RFC 3339 timestamp")]
    InvalidDueDate(String),
}

/// Error returned while parsing a mutable task field name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task field: {0}")]
pub struct ParseTaskFieldError(pub String);

/// Error returned while parsing history actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown history action: {0}")]
pub struct ParseHistoryActionError(pub String);
