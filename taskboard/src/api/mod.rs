//! Task API client layer.
//!
//! Defines the [`TaskApi`] trait that the store talks to. Concrete
//! implementations:
//! - [`http::HttpTaskApi`]: REST client over reqwest
//! - [`memory::InMemoryTaskApi`]: in-process backend for tests and demo mode

pub mod http;
pub mod memory;

use std::future::Future;

use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch};

pub use http::HttpTaskApi;
pub use memory::{InMemoryTaskApi, Operation};

/// Errors that can occur while talking to the task API.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message derived from the response body.
        message: String,
    },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("could not reach task api: {0}")]
    Transport(String),

    /// A 2xx response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns `true` for a 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

/// Async access to the remote task collection.
///
/// Every method is a single request with no retry. Implementations must be
/// shareable across tasks: the store issues bulk deletes concurrently.
pub trait TaskApi: Send + Sync {
    /// Fetch every task in server order.
    fn list(&self) -> impl Future<Output = Result<Vec<Task>, ApiError>> + Send;

    /// Create a task and return it with its server-assigned id.
    fn create(&self, task: &NewTask) -> impl Future<Output = Result<Task, ApiError>> + Send;

    /// Apply a partial update and return the server's representation.
    fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> impl Future<Output = Result<Task, ApiError>> + Send;

    /// Delete a task. Any response body is ignored.
    fn delete(&self, id: TaskId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
