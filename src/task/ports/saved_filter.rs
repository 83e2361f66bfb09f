//! Store port for saved list-filter presets.

use crate::task::domain::{SavedFilter, SavedFilterId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for saved-filter store operations.
pub type SavedFilterStoreResult<T> = Result<T, SavedFilterStoreError>;

/// Persistence contract for saved filter presets.
#[async_trait]
pub trait SavedFilterStore: Send + Sync {
    /// Stores a new preset.
    async fn insert(&self, filter: &SavedFilter) -> SavedFilterStoreResult<()>;

    /// Returns all presets, newest first.
    async fn list(&self) -> SavedFilterStoreResult<Vec<SavedFilter>>;

    /// Deletes a preset.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterStoreError::NotFound`] when the preset does
    /// not exist.
    async fn delete(&self, id: SavedFilterId) -> SavedFilterStoreResult<()>;
}

/// Errors returned by saved-filter store implementations.
#[derive(Debug, Clone, Error)]
pub enum SavedFilterStoreError {
    /// The preset was not found.
    #[error("saved filter not found: {0}")]
    NotFound(SavedFilterId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SavedFilterStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
