//! Partial update payload and field diffing.

use super::field::serialize_optional_instant;
use super::{FieldChange, Task, TaskField, TaskStatus};
use chrono::{DateTime, Utc};

/// Partial update for a task.
///
/// Only fields that are present participate in diffing; an absent field
/// leaves the task's value untouched. Present-but-equal values are
/// ignored, so a patch that changes nothing produces no history entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    name: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<String>,
    responsible: Option<String>,
    due_date: Option<DateTime<Utc>>,
    attachments: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the responsible person.
    #[must_use]
    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the serialized attachments reference.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl Into<String>) -> Self {
        self.attachments = Some(attachments.into());
        self
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.responsible.is_none()
            && self.due_date.is_none()
            && self.attachments.is_none()
    }

    /// Returns the serialized value this patch carries for `field`, or
    /// `None` when the field is absent from the patch.
    #[must_use]
    pub fn value_for(&self, field: TaskField) -> Option<String> {
        match field {
            TaskField::Name => self.name.clone(),
            TaskField::Description => self.description.clone(),
            TaskField::Status => self.status.as_ref().map(|status| status.as_str().to_owned()),
            TaskField::Priority => self.priority.clone(),
            TaskField::Responsible => self.responsible.clone(),
            TaskField::DueDate => self
                .due_date
                .map(|due| serialize_optional_instant(Some(due))),
            TaskField::Attachments => self.attachments.clone(),
        }
    }

    /// Diffs this patch against a task's current state.
    ///
    /// Walks the static field table in order and returns one
    /// [`FieldChange`] per present field whose serialized value differs
    /// from the task's.
    #[must_use]
    pub fn changes_against(&self, task: &Task) -> Vec<FieldChange> {
        TaskField::ALL
            .into_iter()
            .filter_map(|field| {
                let new_value = self.value_for(field)?;
                let old_value = field.current_value(task);
                (new_value != old_value).then_some(FieldChange {
                    field,
                    old_value,
                    new_value,
                })
            })
            .collect()
    }
}
