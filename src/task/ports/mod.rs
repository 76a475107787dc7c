//! Port contracts for the task store.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    FEED_PAGE_SIZE, OwnerTaskFilter, PublishedPage, PublishedTask, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
