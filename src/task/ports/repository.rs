//! Repository port for task persistence and owner-scoped lookup.

use crate::task::domain::{OwnerId, OwnerName, Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Number of tasks per page in the published feed.
pub const FEED_PAGE_SIZE: u32 = 10;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Filter applied to owner-scoped task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerTaskFilter {
    /// Every task that has left the unsaved state.
    #[default]
    All,
    /// Tasks that have left the unsaved state and carry no completion date.
    InProgress,
}

/// Published task joined with its author's display name for feed rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedTask {
    /// The published task.
    pub task: Task,
    /// Display name of the task's owner.
    pub author: OwnerName,
}

/// One page of the published feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    /// Tasks on this page, newest-created first.
    pub tasks: Vec<PublishedTask>,
    /// 1-based page number this page corresponds to.
    pub current_page: u32,
    /// Total number of pages at the time of the query.
    pub total_pages: u32,
}

/// Task persistence contract.
///
/// Every owner-scoped operation performs the ownership check as part of the
/// lookup: an id belonging to a different owner behaves exactly like an
/// absent id, so implementations never leak existence across owners.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists, or [`TaskRepositoryError::UnsavedExists`] when the
    /// task is unsaved and the owner already holds an unsaved task. The
    /// latter is the storage-level backstop for the one-unsaved-task
    /// invariant and must hold even when two inserts race.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by id, scoped to the given owner.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// owner.
    async fn find_for_owner(&self, owner: OwnerId, id: TaskId)
    -> TaskRepositoryResult<Option<Task>>;

    /// Finds the owner's unsaved task, if one exists.
    async fn find_unsaved(&self, owner: OwnerId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists the owner's non-unsaved tasks, newest-created first.
    async fn list_for_owner(
        &self,
        owner: OwnerId,
        filter: OwnerTaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Stamps `completed_on` on every owned, not-yet-completed task in
    /// `ids`, setting `updated_at` to `now`. Ids that are absent, owned by
    /// someone else, or already completed are silently skipped. Returns the
    /// number of tasks completed.
    async fn complete_all(
        &self,
        owner: OwnerId,
        ids: &[TaskId],
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize>;

    /// Deletes a task scoped to the given owner.
    ///
    /// Returns `false` when the task does not exist or belongs to another
    /// owner.
    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns one page of the global published feed, newest-created first,
    /// together with pagination metadata computed from a row count at query
    /// time.
    async fn list_published(&self, page: u32) -> TaskRepositoryResult<PublishedPage>;

    /// Finds a published task by id, any owner, joined with its author.
    ///
    /// Returns `None` when the task does not exist or is not published.
    async fn find_published(&self, id: TaskId) -> TaskRepositoryResult<Option<PublishedTask>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The owner already holds an unsaved task.
    #[error("owner {0} already holds an unsaved task")]
    UnsavedExists(OwnerId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
