//! Handlers mapping endpoint requests to task store operations.

use crate::api::error::ApiResult;
use crate::api::params::{BatchCompleteParams, FeedQuery, TaskListQuery, UpdateTaskParams};
use crate::api::payload::{HealthCheckPayload, TaskFeedPayload, TaskPayload};
use crate::task::domain::{Owner, TaskId};
use crate::task::ports::TaskRepository;
use crate::task::services::{TaskWorkflowError, TaskWorkflowService};
use mockable::Clock;
use std::sync::Arc;

/// API handlers over the task workflow service.
///
/// Every owner-scoped handler takes the caller's resolved [`Owner`]
/// identity; ownership scoping happens inside the store, never here.
#[derive(Clone)]
pub struct TaskApi<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskWorkflowService<R, C>,
}

impl<R, C> TaskApi<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the API surface over a repository and clock.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            service: TaskWorkflowService::new(repository, clock),
        }
    }

    /// `POST /current/tasks`: returns the caller's unsaved task, creating
    /// one when none exists. Responds 200 whether or not a row was created.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`](crate::api::ApiError::Conflict) only when two concurrent calls race
    /// and the retry loses again.
    pub async fn create_current_task(&self, owner: &Owner) -> ApiResult<TaskPayload> {
        let task = match self.service.create_unsaved(owner.id()).await {
            // A lost race means the winner's task exists now; one retry
            // finds it.
            Err(TaskWorkflowError::Conflict(_)) => self.service.create_unsaved(owner.id()).await?,
            other => other?,
        };
        Ok(TaskPayload::new(&task, owner.name(), self.service.today()))
    }

    /// `GET /current/tasks`: lists the caller's non-unsaved tasks, newest
    /// first, optionally restricted to in-progress tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`](crate::api::ApiError::Internal) when the store fails.
    pub async fn list_current_tasks(
        &self,
        owner: &Owner,
        query: &TaskListQuery,
    ) -> ApiResult<Vec<TaskPayload>> {
        let tasks = self
            .service
            .tasks_for_owner(owner.id(), query.filter())
            .await?;
        let today = self.service.today();
        Ok(tasks
            .iter()
            .map(|task| TaskPayload::new(task, owner.name(), today))
            .collect())
    }

    /// `GET /current/tasks/:id`: returns a single owned task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`](crate::api::ApiError::NotFound) when the task is absent or not owned.
    pub async fn show_current_task(&self, owner: &Owner, id: TaskId) -> ApiResult<TaskPayload> {
        let task = self.service.task_for_owner(owner.id(), id).await?;
        Ok(TaskPayload::new(&task, owner.name(), self.service.today()))
    }

    /// `PATCH /current/tasks/:id`: applies a changeset to an owned task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`](crate::api::ApiError::NotFound) when the task is absent or not owned,
    /// or [`ApiError::UnprocessableEntity`](crate::api::ApiError::UnprocessableEntity) with the field-level message
    /// when validation rejects the change.
    pub async fn update_current_task(
        &self,
        owner: &Owner,
        id: TaskId,
        params: UpdateTaskParams,
    ) -> ApiResult<TaskPayload> {
        let changes = params.into_changes();
        let task = self.service.update_task(owner.id(), id, &changes).await?;
        Ok(TaskPayload::new(&task, owner.name(), self.service.today()))
    }

    /// `PATCH /current/tasks/batch_complete`: marks the owned subset of the
    /// given ids completed today. Responds 204 regardless of how many ids
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`](crate::api::ApiError::Internal) when the bulk update fails.
    pub async fn complete_current_tasks(
        &self,
        owner: &Owner,
        params: &BatchCompleteParams,
    ) -> ApiResult<()> {
        self.service.complete_tasks(owner.id(), &params.ids).await?;
        Ok(())
    }

    /// `DELETE /current/tasks/:id`: deletes an owned task. Responds 204.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`](crate::api::ApiError::NotFound) when the task is absent or not owned.
    pub async fn delete_current_task(&self, owner: &Owner, id: TaskId) -> ApiResult<()> {
        self.service.delete_task(owner.id(), id).await?;
        Ok(())
    }

    /// `GET /tasks`: returns one page of the global published feed with
    /// pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`](crate::api::ApiError::Internal) when the feed query fails.
    pub async fn task_feed(&self, query: &FeedQuery) -> ApiResult<TaskFeedPayload> {
        let page = self.service.published_feed(query.page()).await?;
        Ok(TaskFeedPayload::new(&page, self.service.today()))
    }

    /// `GET /tasks/:id`: returns a single published task, any owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`](crate::api::ApiError::NotFound) when the task is absent or not
    /// published.
    pub async fn show_task(&self, id: TaskId) -> ApiResult<TaskPayload> {
        let published = self.service.published_task(id).await?;
        Ok(TaskPayload::new(
            &published.task,
            &published.author,
            self.service.today(),
        ))
    }
}

/// `GET /health_check`: liveness probe, always 200.
#[must_use]
pub fn health_check() -> HealthCheckPayload {
    HealthCheckPayload::new()
}
