//! API error taxonomy and HTTP status mapping.

use crate::api::payload::ErrorPayload;
use crate::task::services::TaskWorkflowError;
use thiserror::Error;
use tracing::error;

/// Result type for API handler operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by API handlers, each mapping to one HTTP status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The requested task is absent or not owned by the caller. The two
    /// cases are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    /// A validation rule rejected the request; carries the field-level
    /// message.
    #[error("{0}")]
    UnprocessableEntity(String),

    /// A concurrent request won the unsaved-task creation race.
    #[error("conflicting concurrent request")]
    Conflict,

    /// The store failed for reasons the caller cannot address.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code this error translates to.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::UnprocessableEntity(_) => 422,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Returns the JSON error body for this error.
    #[must_use]
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
        }
    }
}

impl From<TaskWorkflowError> for ApiError {
    fn from(err: TaskWorkflowError) -> Self {
        match err {
            TaskWorkflowError::NotFound(_) => Self::NotFound,
            TaskWorkflowError::Validation(validation) => {
                Self::UnprocessableEntity(validation.to_string())
            }
            TaskWorkflowError::Conflict(_) => Self::Conflict,
            TaskWorkflowError::Repository(repository) => {
                error!(error = %repository, "task repository failure");
                Self::Internal
            }
        }
    }
}
