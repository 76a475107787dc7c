//! Error types for task domain validation and parsing.

use super::TaskStatus;
use thiserror::Error;

/// Errors returned while validating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A published task must carry a non-blank title.
    #[error("title required")]
    TitleRequired,

    /// A published task must carry a non-blank body.
    #[error("body required")]
    BodyRequired,

    /// An end date being set must lie strictly after the current date.
    #[error("end date must be in the future")]
    EndDateNotInFuture,

    /// The requested status change is not a legal lifecycle transition.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the update attempted to move to.
        to: TaskStatus,
    },

    /// The owner name is empty after trimming.
    #[error("owner name must not be empty")]
    EmptyOwnerName,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
