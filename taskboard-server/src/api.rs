//! HTTP surface of the task API: routes, handlers, and error responses.
//!
//! | Method | Path          | Success                |
//! |--------|---------------|------------------------|
//! | GET    | `/tasks`      | 200, JSON array        |
//! | POST   | `/tasks`      | 201, created task      |
//! | PATCH  | `/tasks/{id}` | 200, updated task      |
//! | DELETE | `/tasks/{id}` | 204, empty body        |
//!
//! Repository failures are answered with `{"message": "..."}`. Malformed
//! request bodies and non-numeric ids are rejected by axum's extractors with
//! a plain-text body.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use taskboard_proto::error::ErrorBody;
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch};

use crate::store::{RepositoryError, TaskRepository};

/// Error response wrapper for handler failures.
#[derive(Debug)]
pub struct ApiError(RepositoryError);

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            RepositoryError::IdsExhausted => StatusCode::INSUFFICIENT_STORAGE,
        };
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

/// Builds the task API router over a shared repository.
pub fn router(repository: Arc<TaskRepository>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(repository)
}

async fn list_tasks(State(repository): State<Arc<TaskRepository>>) -> Json<Vec<Task>> {
    let tasks = repository.list().await;
    tracing::debug!(count = tasks.len(), "listing tasks");
    Json(tasks)
}

async fn create_task(
    State(repository): State<Arc<TaskRepository>>,
    Json(new): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = repository.create(new).await.inspect_err(|e| {
        tracing::warn!(error = %e, "rejected task creation");
    })?;
    tracing::info!(task_id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(repository): State<Arc<TaskRepository>>,
    Path(id): Path<u64>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId::new(id);
    let task = repository.update(id, &patch).await.inspect_err(|e| {
        tracing::warn!(task_id = %id, error = %e, "rejected task update");
    })?;
    tracing::info!(task_id = %id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(repository): State<Arc<TaskRepository>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let id = TaskId::new(id);
    repository.delete(id).await.inspect_err(|e| {
        tracing::warn!(task_id = %id, error = %e, "rejected task deletion");
    })?;
    tracing::info!(task_id = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Starts the task API server with an empty repository.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_repository(addr, Arc::new(TaskRepository::new())).await
}

/// Starts the task API server over an existing repository.
///
/// Binding to port 0 picks a free port; the bound address is returned
/// together with the [`tokio::task::JoinHandle`] of the serving task.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_repository(
    addr: &str,
    repository: Arc<TaskRepository>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(repository);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task api server error");
        }
    });

    Ok((bound_addr, handle))
}
