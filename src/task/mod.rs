//! Task store for HoMee.
//!
//! This module owns the canonical representation of a task, the status
//! lifecycle (`unsaved` -> `draft` -> `published`), and the per-owner
//! invariant that at most one unsaved task exists at a time. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
