//! Task aggregate root and creation payload.

use super::{TaskDomainError, TaskField, TaskId, TaskNumber, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Creation payload for a new task.
///
/// The number and name are required; everything else defaults the way the
/// intake surfaces do (empty description, `in-development` status, no
/// priority/responsible/due date/attachments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    number: TaskNumber,
    name: String,
    description: String,
    status: TaskStatus,
    priority: Option<String>,
    responsible: Option<String>,
    due_date: Option<DateTime<Utc>>,
    attachments: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(number: TaskNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: None,
            responsible: None,
            due_date: None,
            attachments: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
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

    /// Returns the draft's task number.
    #[must_use]
    pub const fn number(&self) -> &TaskNumber {
        &self.number
    }

    /// Returns the draft's task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted work-order number.
    pub number: TaskNumber,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority, if any.
    pub priority: Option<String>,
    /// Persisted responsible person, if any.
    pub responsible: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted attachments reference, if any.
    pub attachments: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if the task ever reached done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted archival flag.
    pub archived: bool,
}

/// Task aggregate root.
///
/// Invariants enforced here rather than in callers: `number` is immutable
/// after creation, `completed_at` is stamped exactly once when the status
/// first transitions into done and never cleared, and `archived` only
/// moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    number: TaskNumber,
    name: String,
    description: String,
    status: TaskStatus,
    priority: Option<String>,
    responsible: Option<String>,
    due_date: Option<DateTime<Utc>>,
    attachments: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    archived: bool,
}

impl Task {
    /// Creates a new active task from a draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let completed_at = draft.status.is_done().then_some(timestamp);
        Self {
            id: TaskId::new(),
            number: draft.number,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            responsible: draft.responsible,
            due_date: draft.due_date,
            attachments: draft.attachments,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at,
            archived: false,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            number: data.number,
            name: data.name,
            description: data.description,
            status: data.status,
            priority: data.priority,
            responsible: data.responsible,
            due_date: data.due_date,
            attachments: data.attachments,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            archived: data.archived,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the work-order number.
    #[must_use]
    pub const fn number(&self) -> &TaskNumber {
        &self.number
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the priority, if set.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    /// Returns the responsible person, if set.
    #[must_use]
    pub fn responsible(&self) -> Option<&str> {
        self.responsible.as_deref()
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the serialized attachments reference, if set.
    #[must_use]
    pub fn attachments(&self) -> Option<&str> {
        self.attachments.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp.
    ///
    /// Non-`None` iff the task has ever reached done status; it is a
    /// high-water mark, not a current-state flag.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task has been archived.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// Returns `true` when the task is overdue as of `now`: the due date
    /// has passed and the task is not done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now) && !self.status.is_done()
    }

    /// Applies a string-serialized value to a mutable field.
    ///
    /// This is the single application path shared by update, bulk update,
    /// and revert: values arrive in the same serialized form the history
    /// ledger stores (`""` for absent, RFC 3339 for the due date). A
    /// status transition into done stamps `completed_at` iff it has never
    /// been set; the stamp is a side effect, not a diffed field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when a due-date value
    /// does not parse as RFC 3339.
    pub fn set_field(
        &mut self,
        field: TaskField,
        value: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        match field {
            TaskField::Name => self.name = value.to_owned(),
            TaskField::Description => self.description = value.to_owned(),
            TaskField::Status => self.transition_status(TaskStatus::new(value), clock),
            TaskField::Priority => self.priority = optional_text(value),
            TaskField::Responsible => self.responsible = optional_text(value),
            TaskField::DueDate => self.due_date = parse_optional_instant(value)?,
            TaskField::Attachments => self.attachments = optional_text(value),
        }
        Ok(())
    }

    /// Marks the task as archived if it is still eligible.
    ///
    /// Eligibility is re-verified here so archival commits stay correct
    /// when a task's status changed between scan and commit: only tasks
    /// that are done and not yet archived flip the flag. Returns whether
    /// the task was archived by this call.
    pub fn mark_archived(&mut self) -> bool {
        if self.archived || !self.status.is_done() {
            return false;
        }
        self.archived = true;
        true
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    fn transition_status(&mut self, next: TaskStatus, clock: &impl Clock) {
        if next.is_done() && !self.status.is_done() && self.completed_at.is_none() {
            self.completed_at = Some(clock.utc());
        }
        self.status = next;
    }
}

/// Maps an empty serialized value to `None`.
fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Parses a serialized optional instant (`""` stands for absent).
fn parse_optional_instant(value: &str) -> Result<Option<DateTime<Utc>>, TaskDomainError> {
    if value.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|instant| Some(instant.with_timezone(&Utc)))
        .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
}
