//! Task status values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Statuses are open strings rather than a closed enum: the shop floor
/// adds ad-hoc stages ("sent", "on hold") without a schema change. The
/// recognized values below drive lifecycle behaviour; everything else is
/// carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    /// Initial status of newly created tasks.
    pub const IN_DEVELOPMENT: &'static str = "in-development";
    /// Preparation finished, ready to start.
    pub const PREPARED: &'static str = "prepared";
    /// Work underway.
    pub const IN_PROGRESS: &'static str = "in-progress";
    /// Work paused.
    pub const STOPPED: &'static str = "stopped";
    /// Work finished; the only status with lifecycle side effects
    /// (completion stamping, archival eligibility).
    pub const DONE: &'static str = "done";

    /// Creates a status from arbitrary text, trimmed.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Returns the status for completed tasks.
    #[must_use]
    pub fn done() -> Self {
        Self(Self::DONE.to_owned())
    }

    /// Returns the status as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the status marks the task as completed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.0 == Self::DONE
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self(Self::IN_DEVELOPMENT.to_owned())
    }
}

impl AsRef<str> for TaskStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
