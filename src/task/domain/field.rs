//! Static table of mutable task fields.
//!
//! The original system diffed updates by reflecting over attribute names;
//! here the mutable surface is an explicit enumeration. Every field has a
//! stable wire name, a string-serialized getter, and (via
//! [`Task::set_field`](super::Task::set_field)) a typed setter, so the
//! diff-and-log path and the revert path share one representation.

use super::{ParseTaskFieldError, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mutable task field.
///
/// `id`, `number`, `created_at`, `completed_at`, and `archived` are
/// deliberately absent: they are immutable, derived, or one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task name.
    Name,
    /// Task description.
    Description,
    /// Lifecycle status.
    Status,
    /// Priority text.
    Priority,
    /// Responsible person.
    Responsible,
    /// Due date.
    DueDate,
    /// Serialized attachments reference.
    Attachments,
}

impl TaskField {
    /// All mutable fields, in diff order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::Responsible,
        Self::DueDate,
        Self::Attachments,
    ];

    /// Returns the canonical wire name, as stored in history entries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Responsible => "responsible",
            Self::DueDate => "due_date",
            Self::Attachments => "attachments",
        }
    }

    /// Returns the task's current value of this field in serialized form
    /// (`""` for absent, RFC 3339 for the due date).
    #[must_use]
    pub fn current_value(self, task: &Task) -> String {
        match self {
            Self::Name => task.name().to_owned(),
            Self::Description => task.description().to_owned(),
            Self::Status => task.status().as_str().to_owned(),
            Self::Priority => task.priority().unwrap_or_default().to_owned(),
            Self::Responsible => task.responsible().unwrap_or_default().to_owned(),
            Self::DueDate => serialize_optional_instant(task.due_date()),
            Self::Attachments => task.attachments().unwrap_or_default().to_owned(),
        }
    }
}

impl TryFrom<&str> for TaskField {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "responsible" => Ok(Self::Responsible),
            "due_date" => Ok(Self::DueDate),
            "attachments" => Ok(Self::Attachments),
            _ => Err(ParseTaskFieldError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected difference between a task and an update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// The field that differs.
    pub field: TaskField,
    /// Serialized value before the change.
    pub old_value: String,
    /// Serialized value after the change.
    pub new_value: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' -> '{}'",
            self.field, self.old_value, self.new_value
        )
    }
}

/// Serializes an optional instant, `""` standing for absent.
pub(crate) fn serialize_optional_instant(value: Option<DateTime<Utc>>) -> String {
    value.map(|instant| instant.to_rfc3339()).unwrap_or_default()
}
