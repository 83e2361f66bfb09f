//! List filtering, sorting, and aggregate statistics for tasks.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Listing filter for tasks.
///
/// All criteria are conjunctive. The overdue predicate needs a reference
/// instant; stores receive it alongside the filter so they stay
/// clock-free and filters stay serializable as saved presets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    archived: bool,
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<String>,
    responsible: Option<String>,
    overdue: bool,
}

impl TaskFilter {
    /// Creates a filter matching all active (non-archived) tasks.
    #[must_use]
    pub fn active() -> Self {
        Self::default()
    }

    /// Creates a filter matching all archived tasks.
    #[must_use]
    pub fn archive() -> Self {
        Self {
            archived: true,
            ..Self::default()
        }
    }

    /// Restricts to tasks whose number, name, description, or responsible
    /// person contains `term` (logical OR across those fields).
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to tasks with exactly this status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks with exactly this priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Restricts to tasks whose responsible person contains `term`.
    #[must_use]
    pub fn with_responsible(mut self, term: impl Into<String>) -> Self {
        self.responsible = Some(term.into());
        self
    }

    /// Restricts to overdue tasks: due date in the past and not done.
    #[must_use]
    pub const fn overdue_only(mut self) -> Self {
        self.overdue = true;
        self
    }

    /// Returns whether archived or active tasks are selected.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&TaskStatus> {
        self.status.as_ref()
    }

    /// Returns the priority criterion, if any.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    /// Returns the responsible-containment criterion, if any.
    #[must_use]
    pub fn responsible(&self) -> Option<&str> {
        self.responsible.as_deref()
    }

    /// Returns whether only overdue tasks are selected.
    #[must_use]
    pub const fn overdue(&self) -> bool {
        self.overdue
    }

    /// Evaluates the filter against one task, judging the overdue
    /// predicate as of `now`.
    #[must_use]
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        if task.archived() != self.archived {
            return false;
        }
        if let Some(term) = self.search.as_deref() {
            let hit = task.number().as_str().contains(term)
                || task.name().contains(term)
                || task.description().contains(term)
                || task.responsible().is_some_and(|person| person.contains(term));
            if !hit {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if task.status() != status {
                return false;
            }
        }
        if let Some(priority) = self.priority.as_deref() {
            if task.priority() != Some(priority) {
                return false;
            }
        }
        if let Some(term) = self.responsible.as_deref() {
            if !task.responsible().is_some_and(|person| person.contains(term)) {
                return false;
            }
        }
        if self.overdue && !task.is_overdue(now) {
            return false;
        }
        true
    }
}

/// Sortable task columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Sort by work-order number.
    Number,
    /// Sort by name.
    Name,
    /// Sort by description.
    Description,
    /// Sort by status.
    Status,
    /// Sort by priority.
    Priority,
    /// Sort by responsible person.
    Responsible,
    /// Sort by due date.
    DueDate,
    /// Sort by creation time.
    CreatedAt,
    /// Sort by last update time.
    UpdatedAt,
    /// Sort by completion time.
    CompletedAt,
}

impl SortKey {
    /// Parses a column name, falling back to [`SortKey::CreatedAt`] for
    /// anything unrecognized. The silent fallback is a designed
    /// tolerance: callers sorting by a column this engine does not know
    /// get the default ordering rather than an error.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "number" => Self::Number,
            "name" => Self::Name,
            "description" => Self::Description,
            "status" => Self::Status,
            "priority" => Self::Priority,
            "responsible" => Self::Responsible,
            "due_date" => Self::DueDate,
            "updated_at" => Self::UpdatedAt,
            "completed_at" => Self::CompletedAt,
            _ => Self::CreatedAt,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// Parses `"asc"`; anything else is descending, matching the default.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// Sort specification for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSort {
    /// Column to sort by.
    pub key: SortKey,
    /// Direction.
    pub order: SortOrder,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Parses user-supplied column and direction, applying the silent
    /// fallbacks of [`SortKey::parse_or_default`] and
    /// [`SortOrder::parse_or_default`].
    #[must_use]
    pub fn parse_or_default(key: &str, order: &str) -> Self {
        Self {
            key: SortKey::parse_or_default(key),
            order: SortOrder::parse_or_default(order),
        }
    }

    /// Compares two tasks under this specification.
    ///
    /// Absent optional values order before present ones ascending.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::Number => a.number().as_str().cmp(b.number().as_str()),
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Description => a.description().cmp(b.description()),
            SortKey::Status => a.status().as_str().cmp(b.status().as_str()),
            SortKey::Priority => a.priority().cmp(&b.priority()),
            SortKey::Responsible => a.responsible().cmp(&b.responsible()),
            SortKey::DueDate => a.due_date().cmp(&b.due_date()),
            SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            SortKey::CompletedAt => a.completed_at().cmp(&b.completed_at()),
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl Default for TaskSort {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Descending,
        }
    }
}

/// Aggregate counters over active (non-archived) tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Number of active tasks.
    pub total_active: usize,
    /// Number of active tasks that are overdue.
    pub overdue: usize,
    /// Active task counts per status.
    pub by_status: BTreeMap<String, usize>,
    /// Active task counts per priority; tasks without a priority are
    /// grouped under the empty string.
    pub by_priority: BTreeMap<String, usize>,
}

impl TaskStats {
    /// Folds statistics over a set of active tasks, judging overdue as of
    /// `now`.
    #[must_use]
    pub fn collect<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total_active += 1;
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            *stats
                .by_status
                .entry(task.status().as_str().to_owned())
                .or_default() += 1;
            *stats
                .by_priority
                .entry(task.priority().unwrap_or_default().to_owned())
                .or_default() += 1;
        }
        stats
    }
}
