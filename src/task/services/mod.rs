//! Orchestration services over the task store ports.

pub mod workflow;

pub use workflow::{TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
