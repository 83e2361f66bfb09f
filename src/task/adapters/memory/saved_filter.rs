//! In-memory saved-filter store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SavedFilter, SavedFilterId},
    ports::{SavedFilterStore, SavedFilterStoreError, SavedFilterStoreResult},
};

/// Thread-safe in-memory store for saved filter presets.
#[derive(Debug, Clone, Default)]
pub struct InMemorySavedFilterStore {
    filters: Arc<RwLock<Vec<SavedFilter>>>,
}

impl InMemorySavedFilterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<T>(err: &std::sync::PoisonError<T>) -> SavedFilterStoreError {
    SavedFilterStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SavedFilterStore for InMemorySavedFilterStore {
    async fn insert(&self, filter: &SavedFilter) -> SavedFilterStoreResult<()> {
        let mut filters = self.filters.write().map_err(|err| lock_poisoned(&err))?;
        filters.push(filter.clone());
        Ok(())
    }

    async fn list(&self) -> SavedFilterStoreResult<Vec<SavedFilter>> {
        let filters = self.filters.read().map_err(|err| lock_poisoned(&err))?;
        Ok(filters.iter().rev().cloned().collect())
    }

    async fn delete(&self, id: SavedFilterId) -> SavedFilterStoreResult<()> {
        let mut filters = self.filters.write().map_err(|err| lock_poisoned(&err))?;
        let position = filters
            .iter()
            .position(|filter| filter.id() == id)
            .ok_or(SavedFilterStoreError::NotFound(id))?;
        filters.remove(position);
        Ok(())
    }
}
