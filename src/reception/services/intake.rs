//! Service layer for goods-reception intake and listing.

use crate::reception::{
    domain::{Reception, ReceptionDomainError, ReceptionDraft, ReceptionFilter},
    ports::{ReceptionRepository, ReceptionRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for reception operations.
#[derive(Debug, Error)]
pub enum ReceptionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ReceptionDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ReceptionRepositoryError),
}

/// Result type for reception operations.
pub type ReceptionResult<T> = Result<T, ReceptionError>;

/// Reception intake orchestration service.
#[derive(Clone)]
pub struct ReceptionService<R, C>
where
    R: ReceptionRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ReceptionService<R, C>
where
    R: ReceptionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new reception service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new reception record.
    ///
    /// # Errors
    ///
    /// Returns [`ReceptionError::Domain`] when a required field is empty
    /// or [`ReceptionError::Repository`] when persistence fails.
    pub async fn create(&self, draft: ReceptionDraft) -> ReceptionResult<Reception> {
        let reception = Reception::new(draft, &*self.clock)?;
        self.repository.insert(&reception).await?;
        Ok(reception)
    }

    /// Lists records matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReceptionError::Repository`] when the lookup fails.
    pub async fn list(&self, filter: &ReceptionFilter) -> ReceptionResult<Vec<Reception>> {
        Ok(self.repository.list(filter).await?)
    }
}
