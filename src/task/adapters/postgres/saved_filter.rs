//! `PostgreSQL` store implementation for saved filter presets.

use super::{
    models::{NewSavedFilterRow, SavedFilterRow},
    repository::TaskPgPool,
    schema::saved_filters,
};
use crate::task::{
    domain::{SavedFilter, SavedFilterId, TaskFilter},
    ports::{SavedFilterStore, SavedFilterStoreError, SavedFilterStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed saved-filter store.
///
/// Filter criteria are persisted as JSONB, the same way structured task
/// payloads are stored elsewhere in the schema.
#[derive(Debug, Clone)]
pub struct PostgresSavedFilterStore {
    pool: TaskPgPool,
}

impl PostgresSavedFilterStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SavedFilterStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SavedFilterStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SavedFilterStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SavedFilterStoreError::persistence)?
    }
}

#[async_trait]
impl SavedFilterStore for PostgresSavedFilterStore {
    async fn insert(&self, filter: &SavedFilter) -> SavedFilterStoreResult<()> {
        let new_row = to_new_row(filter)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(saved_filters::table)
                .values(&new_row)
                .execute(connection)
                .map_err(SavedFilterStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list(&self) -> SavedFilterStoreResult<Vec<SavedFilter>> {
        self.run_blocking(|connection| {
            let rows = saved_filters::table
                .order(saved_filters::created_at.desc())
                .select(SavedFilterRow::as_select())
                .load::<SavedFilterRow>(connection)
                .map_err(SavedFilterStoreError::persistence)?;
            rows.into_iter().map(row_to_filter).collect()
        })
        .await
    }

    async fn delete(&self, id: SavedFilterId) -> SavedFilterStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(saved_filters::table.find(id.into_inner()))
                .execute(connection)
                .map_err(SavedFilterStoreError::persistence)?;
            if affected == 0 {
                return Err(SavedFilterStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(filter: &SavedFilter) -> SavedFilterStoreResult<NewSavedFilterRow> {
    let criteria =
        serde_json::to_value(filter.criteria()).map_err(SavedFilterStoreError::persistence)?;
    Ok(NewSavedFilterRow {
        id: filter.id().into_inner(),
        name: filter.name().to_owned(),
        criteria,
        created_at: filter.created_at(),
    })
}

fn row_to_filter(row: SavedFilterRow) -> SavedFilterStoreResult<SavedFilter> {
    let criteria = serde_json::from_value::<TaskFilter>(row.criteria)
        .map_err(SavedFilterStoreError::persistence)?;
    Ok(SavedFilter::from_persisted(
        SavedFilterId::from_uuid(row.id),
        row.name,
        criteria,
        row.created_at,
    ))
}
