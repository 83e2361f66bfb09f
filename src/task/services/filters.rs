//! Service for saved list-filter presets.

use crate::task::{
    domain::{SavedFilter, SavedFilterId, TaskDomainError, TaskFilter},
    ports::{SavedFilterStore, SavedFilterStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for saved-filter operations.
#[derive(Debug, Error)]
pub enum SavedFilterError {
    /// The referenced preset does not exist.
    #[error("saved filter not found: {0}")]
    NotFound(SavedFilterId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(SavedFilterStoreError),
}

/// Result type for saved-filter operations.
pub type SavedFilterResult<T> = Result<T, SavedFilterError>;

/// Orchestration service for saved filter presets.
#[derive(Clone)]
pub struct SavedFilterService<S, C>
where
    S: SavedFilterStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SavedFilterService<S, C>
where
    S: SavedFilterStore,
    C: Clock + Send + Sync,
{
    /// Creates a new saved-filter service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates and stores a new preset.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterError::Domain`] when the name is empty.
    pub async fn create(
        &self,
        name: impl Into<String> + Send,
        criteria: TaskFilter,
    ) -> SavedFilterResult<SavedFilter> {
        let filter = SavedFilter::new(name, criteria, &*self.clock)?;
        self.store.insert(&filter).await.map_err(store_error)?;
        Ok(filter)
    }

    /// Lists all presets, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterError::Store`] when the lookup fails.
    pub async fn list(&self) -> SavedFilterResult<Vec<SavedFilter>> {
        self.store.list().await.map_err(store_error)
    }

    /// Deletes a preset.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterError::NotFound`] when the preset does not
    /// exist.
    pub async fn delete(&self, id: SavedFilterId) -> SavedFilterResult<()> {
        self.store.delete(id).await.map_err(store_error)
    }
}

/// Lifts store errors into the service taxonomy, keeping NotFound
/// semantic.
fn store_error(err: SavedFilterStoreError) -> SavedFilterError {
    match err {
        SavedFilterStoreError::NotFound(id) => SavedFilterError::NotFound(id),
        other => SavedFilterError::Store(other),
    }
}
