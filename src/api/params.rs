//! Request parameter types for the task endpoints.

use crate::task::domain::{TaskChanges, TaskId, TaskStatus};
use crate::task::ports::OwnerTaskFilter;
use chrono::NaiveDate;
use serde::Deserialize;

/// Body of `PATCH /current/tasks/:id`. Absent fields keep their current
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskParams {
    /// New task title.
    pub title: Option<String>,
    /// New task body.
    pub body: Option<String>,
    /// Target lifecycle status.
    pub status: Option<TaskStatus>,
    /// New task deadline.
    pub end_date: Option<NaiveDate>,
}

impl UpdateTaskParams {
    /// Converts the request body into a domain changeset.
    #[must_use]
    pub fn into_changes(self) -> TaskChanges {
        let mut changes = TaskChanges::new();
        if let Some(title) = self.title {
            changes = changes.with_title(title);
        }
        if let Some(body) = self.body {
            changes = changes.with_body(body);
        }
        if let Some(status) = self.status {
            changes = changes.with_status(status);
        }
        if let Some(end_date) = self.end_date {
            changes = changes.with_end_date(end_date);
        }
        changes
    }
}

/// Body of `PATCH /current/tasks/batch_complete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchCompleteParams {
    /// Tasks to mark completed; ids not owned by the caller are ignored.
    pub ids: Vec<TaskId>,
}

/// State filter accepted by `GET /current/tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStateFilter {
    /// Restrict the listing to tasks without a completion date.
    InProgress,
}

/// Query parameters of `GET /current/tasks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TaskListQuery {
    /// Optional state filter.
    pub state: Option<TaskStateFilter>,
}

impl TaskListQuery {
    /// Returns the repository filter for this query.
    #[must_use]
    pub const fn filter(&self) -> OwnerTaskFilter {
        match self.state {
            Some(TaskStateFilter::InProgress) => OwnerTaskFilter::InProgress,
            None => OwnerTaskFilter::All,
        }
    }
}

/// Query parameters of `GET /tasks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FeedQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<u32>,
}

impl FeedQuery {
    /// Returns the requested page, defaulting to page 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}
