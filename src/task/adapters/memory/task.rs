//! In-memory repository for task store tests and development.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Owner, OwnerId, OwnerName, Task, TaskId, TaskStatus},
    ports::{
        FEED_PAGE_SIZE, OwnerTaskFilter, PublishedPage, PublishedTask, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
///
/// Feed queries join tasks with registered owner names the way the SQL
/// adapter joins the `users` table: tasks whose owner has not been
/// registered via [`register_owner`](Self::register_owner) are absent from
/// feed results.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    owner_names: HashMap<OwnerId, OwnerName>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an owner's display name for feed rendering.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn register_owner(&self, owner: &Owner) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        state.owner_names.insert(owner.id(), owner.name().clone());
        Ok(())
    }
}

fn write_state(
    state: &Arc<RwLock<InMemoryTaskState>>,
) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
    state
        .write()
        .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn read_state(
    state: &Arc<RwLock<InMemoryTaskState>>,
) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
    state
        .read()
        .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

/// Collects the owner's tasks matching `filter`, newest-created first.
fn owned_tasks(state: &InMemoryTaskState, owner: OwnerId, filter: OwnerTaskFilter) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| task.owner() == owner && task.status() != TaskStatus::Unsaved)
        .filter(|task| match filter {
            OwnerTaskFilter::All => true,
            OwnerTaskFilter::InProgress => task.completed_date().is_none(),
        })
        .cloned()
        .collect();
    tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    tasks
}

/// Collects every published task with a registered author, newest first.
fn published_tasks(state: &InMemoryTaskState) -> Vec<PublishedTask> {
    let mut tasks: Vec<PublishedTask> = state
        .tasks
        .values()
        .filter(|task| task.status() == TaskStatus::Published)
        .filter_map(|task| {
            state.owner_names.get(&task.owner()).map(|name| PublishedTask {
                task: task.clone(),
                author: name.clone(),
            })
        })
        .collect();
    tasks.sort_by(|a, b| b.task.created_at().cmp(&a.task.created_at()));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        // Same guarantee as the partial unique index in the SQL adapter.
        if task.status() == TaskStatus::Unsaved {
            let unsaved_held = state
                .tasks
                .values()
                .any(|held| held.owner() == task.owner() && held.status() == TaskStatus::Unsaved);
            if unsaved_held {
                return Err(TaskRepositoryError::UnsavedExists(task.owner()));
            }
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_for_owner(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = read_state(&self.state)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.owner() == owner)
            .cloned())
    }

    async fn find_unsaved(&self, owner: OwnerId) -> TaskRepositoryResult<Option<Task>> {
        let state = read_state(&self.state)?;
        Ok(state
            .tasks
            .values()
            .find(|task| task.owner() == owner && task.status() == TaskStatus::Unsaved)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: OwnerId,
        filter: OwnerTaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = read_state(&self.state)?;
        Ok(owned_tasks(&state, owner, filter))
    }

    async fn complete_all(
        &self,
        owner: OwnerId,
        ids: &[TaskId],
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize> {
        let mut state = write_state(&self.state)?;
        let mut completed = 0;
        for id in ids {
            let Some(task) = state.tasks.get_mut(id) else {
                continue;
            };
            if task.owner() != owner {
                continue;
            }
            if task.stamp_completed(completed_on, now) {
                completed += 1;
            }
        }
        Ok(completed)
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = write_state(&self.state)?;
        let owned = state
            .tasks
            .get(&id)
            .is_some_and(|task| task.owner() == owner);
        if !owned {
            return Ok(false);
        }
        state.tasks.remove(&id);
        Ok(true)
    }

    async fn list_published(&self, page: u32) -> TaskRepositoryResult<PublishedPage> {
        let state = read_state(&self.state)?;
        let all = published_tasks(&state);
        let total = u32::try_from(all.len()).map_err(TaskRepositoryError::persistence)?;
        let total_pages = total.div_ceil(FEED_PAGE_SIZE);

        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(FEED_PAGE_SIZE))
            .map_err(TaskRepositoryError::persistence)?;
        let page_size =
            usize::try_from(FEED_PAGE_SIZE).map_err(TaskRepositoryError::persistence)?;
        let tasks = all.into_iter().skip(offset).take(page_size).collect();

        Ok(PublishedPage {
            tasks,
            current_page: page,
            total_pages,
        })
    }

    async fn find_published(&self, id: TaskId) -> TaskRepositoryResult<Option<PublishedTask>> {
        let state = read_state(&self.state)?;
        let found = state
            .tasks
            .get(&id)
            .filter(|task| task.status() == TaskStatus::Published)
            .and_then(|task| {
                state.owner_names.get(&task.owner()).map(|name| PublishedTask {
                    task: task.clone(),
                    author: name.clone(),
                })
            });
        Ok(found)
    }
}
