//! `taskboard`: terminal task board library.
//!
//! The [`store::TaskStore`] is the single source of truth for task data and
//! talks to the task API through [`api::TaskApi`]. Views subscribe to the
//! store and render from cloned snapshots.

pub mod api;
pub mod app;
pub mod config;
pub mod debounce;
pub mod drag;
pub mod filter;
pub mod store;
pub mod ui;
