//! `Taskboard` task API server library.
//!
//! Exposes the REST server for use in tests and embedding. The server keeps
//! tasks in memory and serves list, create, patch, and delete over the task
//! collection at `/tasks`.

pub mod api;
pub mod config;
pub mod store;
