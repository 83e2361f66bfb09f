//! Diesel row models for task persistence.

use super::schema::{saved_filters, task_history, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Work-order number.
    pub number: String,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional priority text.
    pub priority: Option<String>,
    /// Optional responsible person.
    pub responsible: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional serialized attachments reference.
    pub attachments: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Archival flag.
    pub archived: bool,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Work-order number.
    pub number: String,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional priority text.
    pub priority: Option<String>,
    /// Optional responsible person.
    pub responsible: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional serialized attachments reference.
    pub attachments: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Archival flag.
    pub archived: bool,
}

/// Update model for task records.
///
/// `treat_none_as_null` keeps cleared optional fields (a reverted due
/// date, for example) writing SQL NULL instead of being skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional priority text.
    pub priority: Option<String>,
    /// Optional responsible person.
    pub responsible: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional serialized attachments reference.
    pub attachments: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Archival flag.
    pub archived: bool,
}

/// Query result row for history entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Referenced task.
    pub task_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Human-readable summary.
    pub details: String,
    /// Changed field name.
    pub field_name: String,
    /// Serialized value before the change.
    pub old_value: String,
    /// Serialized value after the change.
    pub new_value: String,
    /// Actor that made the change.
    pub actor: String,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Revertibility flag.
    pub can_revert: bool,
}

/// Insert model for history entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_history)]
pub struct NewHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Referenced task.
    pub task_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Human-readable summary.
    pub details: String,
    /// Changed field name.
    pub field_name: String,
    /// Serialized value before the change.
    pub old_value: String,
    /// Serialized value after the change.
    pub new_value: String,
    /// Actor that made the change.
    pub actor: String,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Revertibility flag.
    pub can_revert: bool,
}

/// Query result row for saved filter presets.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = saved_filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedFilterRow {
    /// Preset identifier.
    pub id: uuid::Uuid,
    /// Preset name.
    pub name: String,
    /// Serialized filter criteria.
    pub criteria: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for saved filter presets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_filters)]
pub struct NewSavedFilterRow {
    /// Preset identifier.
    pub id: uuid::Uuid,
    /// Preset name.
    pub name: String,
    /// Serialized filter criteria.
    pub criteria: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
