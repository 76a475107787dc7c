//! Task status lifecycle.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// A task is created as [`Unsaved`](Self::Unsaved), becomes a
/// [`Draft`](Self::Draft) once real content is supplied, and is
/// [`Published`](Self::Published) via an explicit toggle. A published task
/// may be toggled back to draft; no task ever returns to unsaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Placeholder created before the user fills in real content.
    Unsaved,
    /// Saved task not yet visible in the public feed.
    Draft,
    /// Task visible in the public feed; requires title and body.
    Published,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsaved => "unsaved",
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Returns whether an update may move a task from `self` to `next`.
    ///
    /// Keeping the current status is always legal. The unsaved state is
    /// initial-only: it can be left for either other status but never
    /// re-entered.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Draft | Self::Published, Self::Unsaved) => false,
            (Self::Unsaved, _) | (_, Self::Draft | Self::Published) => true,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unsaved" => Ok(Self::Unsaved),
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
