//! Diesel schema for task store persistence.
//!
//! The one-unsaved-task-per-owner invariant is enforced by a partial unique
//! index on `tasks`:
//! `CREATE UNIQUE INDEX idx_tasks_owner_unsaved_unique ON tasks (user_id)
//! WHERE status = 'unsaved'`.

diesel::table! {
    /// Task records owned by users.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user's identifier.
        user_id -> Uuid,
        /// Task title; empty until the task leaves the unsaved state.
        #[max_length = 255]
        title -> Nullable<Varchar>,
        /// Task body; empty until the task leaves the unsaved state.
        body -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional task deadline.
        end_date -> Nullable<Date>,
        /// Date the task was completed, set by batch completion.
        completed_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User records; owned by the external authentication system, read here
    /// for author names in the published feed.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
