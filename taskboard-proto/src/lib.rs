//! Shared definitions for the `Taskboard` REST API and view state.

pub mod error;
pub mod query;
pub mod task;
