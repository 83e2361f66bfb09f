//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        PersistedTaskData, SortKey, SortOrder, Task, TaskFilter, TaskId, TaskNumber, TaskSort,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Boxed task query, used to compose filters dynamically.
type BoxedTaskQuery<'a> = tasks::BoxedQuery<'a, Pg>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let number = task.number().clone();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            // The pre-check improves semantic error reporting but is not
            // relied on for correctness: the unique index still enforces
            // integrity in the TOCTOU window between check and insert.
            let duplicate = find_row_by_number(connection, &number)?;
            if duplicate.is_some() {
                return Err(TaskRepositoryError::DuplicateNumber(number.clone()));
            }

            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateNumber(number.clone())
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_number(&self, number: &TaskNumber) -> TaskRepositoryResult<Option<Task>> {
        let lookup = number.clone();
        self.run_blocking(move |connection| {
            let row = find_row_by_number(connection, &lookup)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let query = apply_sort(apply_filter(tasks::table.into_boxed(), &filter, now), sort);
            let rows = query
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn archival_candidates(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::archived.eq(false))
                .filter(tasks::status.eq(TaskStatus::DONE))
                .filter(tasks::completed_at.lt(cutoff))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn archive(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            // Archival eligibility is re-checked inside the UPDATE's
            // predicate so a task whose status changed after the scan is
            // left untouched.
            let affected = diesel::update(
                tasks::table
                    .find(id.into_inner())
                    .filter(tasks::status.eq(TaskStatus::DONE))
                    .filter(tasks::archived.eq(false)),
            )
            .set(tasks::archived.eq(true))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn apply_filter(
    mut query: BoxedTaskQuery<'static>,
    filter: &TaskFilter,
    now: DateTime<Utc>,
) -> BoxedTaskQuery<'static> {
    query = query.filter(tasks::archived.eq(filter.archived()));

    if let Some(term) = filter.search() {
        let pattern = format!("%{term}%");
        query = query.filter(
            tasks::number
                .like(pattern.clone())
                .or(tasks::name.like(pattern.clone()))
                .or(tasks::description.like(pattern.clone()))
                .or(tasks::responsible.like(pattern)),
        );
    }
    if let Some(status) = filter.status() {
        query = query.filter(tasks::status.eq(status.as_str().to_owned()));
    }
    if let Some(priority) = filter.priority() {
        query = query.filter(tasks::priority.eq(priority.to_owned()));
    }
    if let Some(term) = filter.responsible() {
        query = query.filter(tasks::responsible.like(format!("%{term}%")));
    }
    if filter.overdue() {
        query = query
            .filter(tasks::due_date.lt(now))
            .filter(tasks::status.ne(TaskStatus::DONE));
    }
    query
}

fn apply_sort(query: BoxedTaskQuery<'static>, sort: TaskSort) -> BoxedTaskQuery<'static> {
    match (sort.key, sort.order) {
        (SortKey::Number, SortOrder::Ascending) => query.order(tasks::number.asc()),
        (SortKey::Number, SortOrder::Descending) => query.order(tasks::number.desc()),
        (SortKey::Name, SortOrder::Ascending) => query.order(tasks::name.asc()),
        (SortKey::Name, SortOrder::Descending) => query.order(tasks::name.desc()),
        (SortKey::Description, SortOrder::Ascending) => query.order(tasks::description.asc()),
        (SortKey::Description, SortOrder::Descending) => query.order(tasks::description.desc()),
        (SortKey::Status, SortOrder::Ascending) => query.order(tasks::status.asc()),
        (SortKey::Status, SortOrder::Descending) => query.order(tasks::status.desc()),
        (SortKey::Priority, SortOrder::Ascending) => query.order(tasks::priority.asc()),
        (SortKey::Priority, SortOrder::Descending) => query.order(tasks::priority.desc()),
        (SortKey::Responsible, SortOrder::Ascending) => query.order(tasks::responsible.asc()),
        (SortKey::Responsible, SortOrder::Descending) => query.order(tasks::responsible.desc()),
        (SortKey::DueDate, SortOrder::Ascending) => query.order(tasks::due_date.asc()),
        (SortKey::DueDate, SortOrder::Descending) => query.order(tasks::due_date.desc()),
        (SortKey::CreatedAt, SortOrder::Ascending) => query.order(tasks::created_at.asc()),
        (SortKey::CreatedAt, SortOrder::Descending) => query.order(tasks::created_at.desc()),
        (SortKey::UpdatedAt, SortOrder::Ascending) => query.order(tasks::updated_at.asc()),
        (SortKey::UpdatedAt, SortOrder::Descending) => query.order(tasks::updated_at.desc()),
        (SortKey::CompletedAt, SortOrder::Ascending) => query.order(tasks::completed_at.asc()),
        (SortKey::CompletedAt, SortOrder::Descending) => query.order(tasks::completed_at.desc()),
    }
}

fn find_row_by_number(
    connection: &mut PgConnection,
    number: &TaskNumber,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::number.eq(number.as_str()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        number: task.number().as_str().to_owned(),
        name: task.name().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().map(ToOwned::to_owned),
        responsible: task.responsible().map(ToOwned::to_owned),
        due_date: task.due_date(),
        attachments: task.attachments().map(ToOwned::to_owned),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
        archived: task.archived(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        name: task.name().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().map(ToOwned::to_owned),
        responsible: task.responsible().map(ToOwned::to_owned),
        due_date: task.due_date(),
        attachments: task.attachments().map(ToOwned::to_owned),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
        archived: task.archived(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let number = TaskNumber::new(row.number).map_err(TaskRepositoryError::persistence)?;
    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        number,
        name: row.name,
        description: row.description,
        status: TaskStatus::new(row.status),
        priority: row.priority,
        responsible: row.responsible,
        due_date: row.due_date,
        attachments: row.attachments,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
        archived: row.archived,
    };
    Ok(Task::from_persisted(data))
}
