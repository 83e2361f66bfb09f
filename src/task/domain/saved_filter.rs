//! Named, persisted list-filter presets.

use super::{SavedFilterId, TaskDomainError, TaskFilter};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named filter preset a user can re-apply to task listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    id: SavedFilterId,
    name: String,
    criteria: TaskFilter,
    created_at: DateTime<Utc>,
}

impl SavedFilter {
    /// Creates a new preset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyFilterName`] if the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        criteria: TaskFilter,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(TaskDomainError::EmptyFilterName);
        }
        Ok(Self {
            id: SavedFilterId::new(),
            name,
            criteria,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a preset from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: SavedFilterId,
        name: String,
        criteria: TaskFilter,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            criteria,
            created_at,
        }
    }

    /// Returns the preset identifier.
    #[must_use]
    pub const fn id(&self) -> SavedFilterId {
        self.id
    }

    /// Returns the preset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &TaskFilter {
        &self.criteria
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
