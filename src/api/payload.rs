//! Response payloads for the task endpoints.
//!
//! The task payload key set (`id, title, body, status, end_date,
//! created_at, from_today, user`) is preserved exactly for frontend
//! compatibility.

use crate::task::domain::{OwnerName, Task, TaskId, TaskStatus};
use crate::task::ports::PublishedPage;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Owner fragment embedded in task payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    /// Display name of the task's owner.
    pub name: String,
}

/// Single-task payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    /// Task identifier.
    pub id: TaskId,
    /// Task title, if set.
    pub title: Option<String>,
    /// Task body, if set.
    pub body: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Task deadline, if set.
    pub end_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Human-readable age of the task ("today", "3 days ago").
    pub from_today: String,
    /// Owner fragment.
    pub user: UserPayload,
}

impl TaskPayload {
    /// Renders a task with its author's display name.
    #[must_use]
    pub fn new(task: &Task, author: &OwnerName, today: NaiveDate) -> Self {
        Self {
            id: task.id(),
            title: task.title().map(ToOwned::to_owned),
            body: task.body().map(ToOwned::to_owned),
            status: task.status(),
            end_date: task.end_date(),
            created_at: task.created_at(),
            from_today: from_today(task.created_at().date_naive(), today),
            user: UserPayload {
                name: author.as_str().to_owned(),
            },
        }
    }
}

/// Renders the day-granularity age of a task.
fn from_today(created_on: NaiveDate, today: NaiveDate) -> String {
    let days = (today - created_on).num_days();
    match days {
        ..=0 => "today".to_owned(),
        1 => "1 day ago".to_owned(),
        _ => format!("{days} days ago"),
    }
}

/// Pagination metadata for the published feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedMetaPayload {
    /// 1-based page number of this page.
    pub current_page: u32,
    /// Total number of pages at query time.
    pub total_pages: u32,
}

/// Envelope of `GET /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFeedPayload {
    /// Tasks on this page, newest-created first.
    pub tasks: Vec<TaskPayload>,
    /// Pagination metadata.
    pub meta: FeedMetaPayload,
}

impl TaskFeedPayload {
    /// Renders a feed page.
    #[must_use]
    pub fn new(page: &PublishedPage, today: NaiveDate) -> Self {
        Self {
            tasks: page
                .tasks
                .iter()
                .map(|published| TaskPayload::new(&published.task, &published.author, today))
                .collect(),
            meta: FeedMetaPayload {
                current_page: page.current_page,
                total_pages: page.total_pages,
            },
        }
    }
}

/// Body of `GET /health_check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckPayload {
    /// Fixed success message.
    pub message: String,
}

impl HealthCheckPayload {
    /// Creates the health check response body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Success Health Check!".to_owned(),
        }
    }
}

impl Default for HealthCheckPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    /// Human-readable error message.
    pub error: String,
}
