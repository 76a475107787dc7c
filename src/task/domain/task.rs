//! Task aggregate root.

use super::{OwnerId, TaskChanges, TaskDomainError, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task belongs to exactly one owner for its lifetime. Title and body stay
/// empty while the task is unsaved and are validated once it is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: OwnerId,
    title: Option<String>,
    body: Option<String>,
    status: TaskStatus,
    end_date: Option<NaiveDate>,
    completed_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner: OwnerId,
    /// Persisted title, if any.
    pub title: Option<String>,
    /// Persisted body, if any.
    pub body: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted end date, if any.
    pub end_date: Option<NaiveDate>,
    /// Persisted completion date, if any.
    pub completed_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates the placeholder task an owner edits before first saving.
    ///
    /// All content fields start empty; the status is
    /// [`TaskStatus::Unsaved`].
    #[must_use]
    pub fn new_unsaved(owner: OwnerId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            title: None,
            body: None,
            status: TaskStatus::Unsaved,
            end_date: None,
            completed_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            body: data.body,
            status: data.status,
            end_date: data.end_date,
            completed_date: data.completed_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the task title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the task body, if set.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the end date, if set.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the completion date, if set.
    #[must_use]
    pub const fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task counts towards the in-progress view: left
    /// the unsaved state and not yet completed.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        !matches!(self.status, TaskStatus::Unsaved) && self.completed_date.is_none()
    }

    /// Applies an update changeset after validating the result.
    ///
    /// Validation happens against the task as it would look after the
    /// update; on failure the task is left untouched, so a rejected update
    /// never partially persists.
    ///
    /// # Errors
    ///
    /// - [`TaskDomainError::InvalidStatusTransition`] when the status change
    ///   is not a legal lifecycle transition.
    /// - [`TaskDomainError::TitleRequired`] / [`TaskDomainError::BodyRequired`]
    ///   when the resulting status is published with a blank field.
    /// - [`TaskDomainError::EndDateNotInFuture`] when an end date being set
    ///   does not lie strictly after the current date.
    pub fn apply(
        &mut self,
        changes: &TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let next_status = changes.status().unwrap_or(self.status);
        if !self.status.can_transition_to(next_status) {
            return Err(TaskDomainError::InvalidStatusTransition {
                from: self.status,
                to: next_status,
            });
        }

        if next_status == TaskStatus::Published {
            let title = changes.title().or_else(|| self.title());
            if !is_present(title) {
                return Err(TaskDomainError::TitleRequired);
            }
            let body = changes.body().or_else(|| self.body());
            if !is_present(body) {
                return Err(TaskDomainError::BodyRequired);
            }
        }

        if let Some(end_date) = changes.end_date() {
            if end_date <= clock.utc().date_naive() {
                return Err(TaskDomainError::EndDateNotInFuture);
            }
        }

        if let Some(title) = changes.title() {
            self.title = Some(title.to_owned());
        }
        if let Some(body) = changes.body() {
            self.body = Some(body.to_owned());
        }
        if let Some(end_date) = changes.end_date() {
            self.end_date = Some(end_date);
        }
        self.status = next_status;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task completed on the given date, setting `updated_at` to
    /// `now`.
    ///
    /// Completion dates are immutable: returns `false` without modifying the
    /// task when one is already set. Batch completion stamps the current
    /// date by construction, so no field validation is re-run here.
    pub const fn stamp_completed(&mut self, completed_on: NaiveDate, now: DateTime<Utc>) -> bool {
        if self.completed_date.is_some() {
            return false;
        }
        self.completed_date = Some(completed_on);
        self.updated_at = now;
        true
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Returns whether an optional text field holds non-blank content.
fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
