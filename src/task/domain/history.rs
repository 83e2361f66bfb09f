//! Append-only audit history for task changes.
//!
//! Each entry records one change with enough context to summarize it and,
//! for single-field updates, to undo it. Entries are immutable once
//! written: revert appends a new entry rather than editing an old one.

use super::{FieldChange, HistoryEntryId, ParseHistoryActionError, Task, TaskField, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default actor recorded when no user context is supplied.
pub const SYSTEM_ACTOR: &str = "system";

/// The kind of change a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// Task created.
    Created,
    /// One field changed by a single-task update.
    Updated,
    /// One or more fields changed by a bulk update (one entry per task).
    BulkUpdated,
    /// Task created by a batch import.
    Imported,
    /// A prior field change was rolled back.
    Reverted,
    /// Task moved to the archive.
    Archived,
}

impl HistoryAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::BulkUpdated => "bulk_updated",
            Self::Imported => "imported",
            Self::Reverted => "reverted",
            Self::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for HistoryAction {
    type Error = ParseHistoryActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "bulk_updated" => Ok(Self::BulkUpdated),
            "imported" => Ok(Self::Imported),
            "reverted" => Ok(Self::Reverted),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseHistoryActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted action.
    pub action: HistoryAction,
    /// Persisted summary text.
    pub details: String,
    /// Persisted field name (empty for non-field-level actions).
    pub field_name: String,
    /// Persisted serialized old value.
    pub old_value: String,
    /// Persisted serialized new value.
    pub new_value: String,
    /// Persisted actor.
    pub actor: String,
    /// Persisted timestamp.
    pub timestamp: DateTime<Utc>,
    /// Persisted revertibility flag.
    pub can_revert: bool,
}

/// One immutable audit record.
///
/// `task_id` is a non-owning reference: entries survive deletion of the
/// task they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    action: HistoryAction,
    details: String,
    field_name: String,
    old_value: String,
    new_value: String,
    actor: String,
    timestamp: DateTime<Utc>,
    can_revert: bool,
}

impl HistoryEntry {
    /// Records the creation of a task. Not individually revertible.
    #[must_use]
    pub fn created(task: &Task, actor: impl Into<String>, clock: &impl Clock) -> Self {
        Self::non_field(
            task.id(),
            HistoryAction::Created,
            format!("Created new task '{}'", task.name()),
            actor,
            clock,
        )
    }

    /// Records one field change from a single-task update.
    ///
    /// These are the only revertible entries: the serialized old value is
    /// sufficient to restore the field through the same setter path.
    #[must_use]
    pub fn field_updated(
        task_id: TaskId,
        change: &FieldChange,
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            action: HistoryAction::Updated,
            details: format!(
                "Field '{}' changed: '{}' -> '{}'",
                change.field, change.old_value, change.new_value
            ),
            field_name: change.field.as_str().to_owned(),
            old_value: change.old_value.clone(),
            new_value: change.new_value.clone(),
            actor: actor.into(),
            timestamp: clock.utc(),
            can_revert: true,
        }
    }

    /// Records all field changes a bulk update applied to one task.
    ///
    /// Deliberately coarser than single-task updates: one consolidated
    /// entry per task keeps large batches from exploding the ledger, at
    /// the cost of not being revertible.
    #[must_use]
    pub fn bulk_updated(
        task_id: TaskId,
        changes: &[FieldChange],
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let summary = changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::non_field(
            task_id,
            HistoryAction::BulkUpdated,
            format!("Changes: {summary}"),
            actor,
            clock,
        )
    }

    /// Records a task created by a batch import.
    #[must_use]
    pub fn imported(
        task: &Task,
        source: &str,
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self::non_field(
            task.id(),
            HistoryAction::Imported,
            format!("Task imported from '{source}'"),
            actor,
            clock,
        )
    }

    /// Records a revert of a prior field change.
    ///
    /// `previous_value` is the value the field held immediately before
    /// the revert; `restored_value` is the old value being re-applied.
    /// Reverts are never themselves revertible, which keeps revert
    /// chains from thrashing back and forth.
    #[must_use]
    pub fn reverted(
        task_id: TaskId,
        field: TaskField,
        previous_value: &str,
        restored_value: &str,
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            action: HistoryAction::Reverted,
            details: format!(
                "Reverted field '{field}': '{previous_value}' -> '{restored_value}'"
            ),
            field_name: field.as_str().to_owned(),
            old_value: previous_value.to_owned(),
            new_value: restored_value.to_owned(),
            actor: actor.into(),
            timestamp: clock.utc(),
            can_revert: false,
        }
    }

    /// Records automatic archival of a completed task.
    #[must_use]
    pub fn archived(task: &Task, actor: impl Into<String>, clock: &impl Clock) -> Self {
        Self::non_field(
            task.id(),
            HistoryAction::Archived,
            format!("Automatically archived task '{}'", task.name()),
            actor,
            clock,
        )
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            action: data.action,
            details: data.details,
            field_name: data.field_name,
            old_value: data.old_value,
            new_value: data.new_value,
            actor: data.actor,
            timestamp: data.timestamp,
            can_revert: data.can_revert,
        }
    }

    fn non_field(
        task_id: TaskId,
        action: HistoryAction,
        details: String,
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            action,
            details,
            field_name: String::new(),
            old_value: String::new(),
            new_value: String::new(),
            actor: actor.into(),
            timestamp: clock.utc(),
            can_revert: false,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the referenced task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> HistoryAction {
        self.action
    }

    /// Returns the human-readable summary.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the field name, empty for non-field-level actions.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Returns the serialized value before the change.
    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Returns the serialized value after the change.
    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    /// Returns the actor that made the change.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` when the entry can be re-applied in reverse.
    #[must_use]
    pub const fn can_revert(&self) -> bool {
        self.can_revert
    }
}
