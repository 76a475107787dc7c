//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    pub user_id: uuid::Uuid,
    /// Title, if set.
    pub title: Option<String>,
    /// Body, if set.
    pub body: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Task deadline, if set.
    pub end_date: Option<NaiveDate>,
    /// Completion date, if set.
    pub completed_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    pub user_id: uuid::Uuid,
    /// Title, if set.
    pub title: Option<String>,
    /// Body, if set.
    pub body: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Task deadline, if set.
    pub end_date: Option<NaiveDate>,
    /// Completion date, if set.
    pub completed_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
