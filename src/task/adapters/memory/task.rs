//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskNumber, TaskSort},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Keeps a secondary index from work-order number to task id so number
/// uniqueness covers archived tasks exactly like the production store's
/// unique index does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    number_index: HashMap<TaskNumber, TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<T>(err: &std::sync::PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        if state.number_index.contains_key(task.number()) {
            return Err(TaskRepositoryError::DuplicateNumber(task.number().clone()));
        }
        state.number_index.insert(task.number().clone(), task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        // Numbers are immutable after creation, so the index needs no
        // maintenance here.
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &TaskNumber) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        let task = state
            .number_index
            .get(number)
            .and_then(|task_id| state.tasks.get(task_id))
            .cloned();
        Ok(task)
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task, now))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| sort.compare(a, b));
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.number_index.remove(task.number());
        Ok(())
    }

    async fn archival_candidates(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        let candidates = state
            .tasks
            .values()
            .filter(|task| {
                !task.archived()
                    && task.status().is_done()
                    && task.completed_at().is_some_and(|completed| completed < cutoff)
            })
            .cloned()
            .collect();
        Ok(candidates)
    }

    async fn archive(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        Ok(state
            .tasks
            .get_mut(&id)
            .is_some_and(Task::mark_archived))
    }
}
