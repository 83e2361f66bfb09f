//! Repository port for reception record persistence.

use crate::reception::domain::{Reception, ReceptionFilter};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reception repository operations.
pub type ReceptionRepositoryResult<T> = Result<T, ReceptionRepositoryError>;

/// Reception persistence contract.
#[async_trait]
pub trait ReceptionRepository: Send + Sync {
    /// Stores a new record.
    async fn insert(&self, reception: &Reception) -> ReceptionRepositoryResult<()>;

    /// Lists records matching `filter`, newest reception date first.
    async fn list(&self, filter: &ReceptionFilter) -> ReceptionRepositoryResult<Vec<Reception>>;
}

/// Errors returned by reception repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReceptionRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReceptionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
