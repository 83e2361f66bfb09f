//! In-memory reception repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::reception::{
    domain::{Reception, ReceptionFilter},
    ports::{ReceptionRepository, ReceptionRepositoryError, ReceptionRepositoryResult},
};

/// Thread-safe in-memory reception repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceptionRepository {
    records: Arc<RwLock<Vec<Reception>>>,
}

impl InMemoryReceptionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<T>(err: &std::sync::PoisonError<T>) -> ReceptionRepositoryError {
    ReceptionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReceptionRepository for InMemoryReceptionRepository {
    async fn insert(&self, reception: &Reception) -> ReceptionRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| lock_poisoned(&err))?;
        records.push(reception.clone());
        Ok(())
    }

    async fn list(&self, filter: &ReceptionFilter) -> ReceptionRepositoryResult<Vec<Reception>> {
        let records = self.records.read().map_err(|err| lock_poisoned(&err))?;
        let mut matching: Vec<Reception> = records
            .iter()
            .filter(|reception| filter.matches(reception))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(matching)
    }
}
