//! `PostgreSQL` repository implementation for reception storage.

use super::{
    models::{NewReceptionRow, ReceptionRow},
    schema::receptions,
};
use crate::reception::{
    domain::{PersistedReceptionData, Reception, ReceptionFilter, ReceptionId},
    ports::{ReceptionRepository, ReceptionRepositoryError, ReceptionRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by reception adapters.
pub type ReceptionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed reception repository.
#[derive(Debug, Clone)]
pub struct PostgresReceptionRepository {
    pool: ReceptionPgPool,
}

impl PostgresReceptionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReceptionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReceptionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReceptionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReceptionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReceptionRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReceptionRepository for PostgresReceptionRepository {
    async fn insert(&self, reception: &Reception) -> ReceptionRepositoryResult<()> {
        let new_row = to_new_row(reception);
        self.run_blocking(move |connection| {
            diesel::insert_into(receptions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ReceptionRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list(&self, filter: &ReceptionFilter) -> ReceptionRepositoryResult<Vec<Reception>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = receptions::table.into_boxed::<Pg>();
            if let Some(term) = filter.search() {
                let pattern = format!("%{term}%");
                query = query.filter(
                    receptions::order_number
                        .like(pattern.clone())
                        .or(receptions::designation.like(pattern.clone()))
                        .or(receptions::name.like(pattern.clone()))
                        .or(receptions::route_card_number.like(pattern)),
                );
            }
            if let Some(status) = filter.status() {
                query = query.filter(receptions::status.eq(status.to_owned()));
            }
            let rows = query
                .order(receptions::date.desc())
                .select(ReceptionRow::as_select())
                .load::<ReceptionRow>(connection)
                .map_err(ReceptionRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_reception).collect())
        })
        .await
    }
}

fn to_new_row(reception: &Reception) -> NewReceptionRow {
    NewReceptionRow {
        id: reception.id().into_inner(),
        date: reception.date(),
        order_number: reception.order_number().to_owned(),
        designation: reception.designation().to_owned(),
        name: reception.name().to_owned(),
        quantity: reception.quantity().to_owned(),
        route_card_number: reception.route_card_number().to_owned(),
        status: reception.status().to_owned(),
        created_at: reception.created_at(),
    }
}

fn row_to_reception(row: ReceptionRow) -> Reception {
    Reception::from_persisted(PersistedReceptionData {
        id: ReceptionId::from_uuid(row.id),
        date: row.date,
        order_number: row.order_number,
        designation: row.designation,
        name: row.name,
        quantity: row.quantity,
        route_card_number: row.route_card_number,
        status: row.status,
        created_at: row.created_at,
    })
}
