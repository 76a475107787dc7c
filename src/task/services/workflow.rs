//! Service layer for owner-scoped task operations and the published feed.

use crate::task::{
    domain::{OwnerId, Task, TaskChanges, TaskDomainError, TaskId},
    ports::{OwnerTaskFilter, PublishedPage, PublishedTask, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The task is absent or belongs to another owner. The two cases are
    /// indistinguishable by design.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// A concurrent creation raced past the unsaved-task existence check.
    #[error("concurrent unsaved-task creation for owner {0}")]
    Conflict(OwnerId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskWorkflowError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::UnsavedExists(owner) => Self::Conflict(owner),
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the owner's unsaved task, creating one when none exists.
    ///
    /// Idempotent per owner: repeated calls with no intervening update
    /// return the same task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Conflict`] when a concurrent call races
    /// past the existence check; a retry will find the winner's task.
    pub async fn create_unsaved(&self, owner: OwnerId) -> TaskWorkflowResult<Task> {
        if let Some(existing) = self.repository.find_unsaved(owner).await? {
            debug!(%owner, task_id = %existing.id(), "reusing existing unsaved task");
            return Ok(existing);
        }

        let task = Task::new_unsaved(owner, &*self.clock);
        match self.repository.insert(&task).await {
            Ok(()) => {
                info!(%owner, task_id = %task.id(), "created unsaved task");
                Ok(task)
            }
            Err(TaskRepositoryError::UnsavedExists(_)) => {
                warn!(%owner, "lost unsaved-task creation race");
                Err(TaskWorkflowError::Conflict(owner))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a changeset to an owned task and persists the result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task is absent or
    /// not owned, and [`TaskWorkflowError::Validation`] when the changeset
    /// violates a lifecycle or field rule; nothing is persisted on failure.
    pub async fn update_task(
        &self,
        owner: OwnerId,
        id: TaskId,
        changes: &TaskChanges,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self
            .repository
            .find_for_owner(owner, id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))?;

        task.apply(changes, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!(%owner, task_id = %id, status = %task.status(), "updated task");
        Ok(task)
    }

    /// Lists the owner's non-unsaved tasks, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the listing fails.
    pub async fn tasks_for_owner(
        &self,
        owner: OwnerId,
        filter: OwnerTaskFilter,
    ) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.list_for_owner(owner, filter).await?)
    }

    /// Returns a single owned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task is absent or
    /// not owned.
    pub async fn task_for_owner(&self, owner: OwnerId, id: TaskId) -> TaskWorkflowResult<Task> {
        self.repository
            .find_for_owner(owner, id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))
    }

    /// Marks every owned, not-yet-completed task in `ids` as completed
    /// today. Ids not belonging to the owner are silently ignored. Returns
    /// the number of tasks completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the bulk update fails.
    pub async fn complete_tasks(
        &self,
        owner: OwnerId,
        ids: &[TaskId],
    ) -> TaskWorkflowResult<usize> {
        let now = self.clock.utc();
        let completed = self
            .repository
            .complete_all(owner, ids, now.date_naive(), now)
            .await?;
        info!(%owner, requested = ids.len(), completed, "batch-completed tasks");
        Ok(completed)
    }

    /// Deletes an owned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task is absent or
    /// not owned.
    pub async fn delete_task(&self, owner: OwnerId, id: TaskId) -> TaskWorkflowResult<()> {
        let deleted = self.repository.delete(owner, id).await?;
        if !deleted {
            return Err(TaskWorkflowError::NotFound(id));
        }
        info!(%owner, task_id = %id, "deleted task");
        Ok(())
    }

    /// Returns one page of the global published feed. Page numbers are
    /// 1-based; zero is treated as the first page.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the feed query fails.
    pub async fn published_feed(&self, page: u32) -> TaskWorkflowResult<PublishedPage> {
        let requested = page.max(1);
        let feed = self.repository.list_published(requested).await?;
        debug!(
            current_page = feed.current_page,
            total_pages = feed.total_pages,
            "served published feed page"
        );
        Ok(feed)
    }

    /// Returns a single published task, any owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task is absent or
    /// not published.
    pub async fn published_task(&self, id: TaskId) -> TaskWorkflowResult<PublishedTask> {
        self.repository
            .find_published(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))
    }

    /// Returns the current date according to the service clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.utc().date_naive()
    }
}
