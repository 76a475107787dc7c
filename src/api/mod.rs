//! HTTP-shaped API surface over the task store.
//!
//! Routing and authentication are external collaborators: handlers receive
//! an already-resolved [`Owner`](crate::task::domain::Owner) identity and
//! typed parameters, and return typed payloads or an [`ApiError`] carrying
//! the HTTP status to respond with. The endpoint mapping:
//!
//! | Route                                  | Handler                  | Success |
//! |----------------------------------------|--------------------------|---------|
//! | `POST /current/tasks`                  | `create_current_task`    | 200     |
//! | `GET /current/tasks[?state=]`          | `list_current_tasks`     | 200     |
//! | `GET /current/tasks/:id`               | `show_current_task`      | 200     |
//! | `PATCH /current/tasks/:id`             | `update_current_task`    | 200     |
//! | `PATCH /current/tasks/batch_complete`  | `complete_current_tasks` | 204     |
//! | `DELETE /current/tasks/:id`            | `delete_current_task`    | 204     |
//! | `GET /tasks[?page=]`                   | `task_feed`              | 200     |
//! | `GET /tasks/:id`                       | `show_task`              | 200     |
//! | `GET /health_check`                    | `health_check`           | 200     |
//!
//! All payload keys are `snake_case` on the wire; the store never sees wire
//! naming.

mod error;
mod handlers;
mod params;
mod payload;

pub use error::{ApiError, ApiResult};
pub use handlers::{TaskApi, health_check};
pub use params::{BatchCompleteParams, FeedQuery, TaskListQuery, TaskStateFilter, UpdateTaskParams};
pub use payload::{
    ErrorPayload, FeedMetaPayload, HealthCheckPayload, TaskFeedPayload, TaskPayload, UserPayload,
};

#[cfg(test)]
mod tests;
