//! In-process task backend for testing and demo mode.
//!
//! [`InMemoryTaskApi`] behaves like the REST server (id assignment, 400 on
//! invalid titles, 404 on unknown ids) without a socket. Clones share the
//! same backend, so a test can hand one clone to the store and keep another
//! to inspect server-side state or inject failures.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch};

use super::{ApiError, TaskApi};

/// A [`TaskApi`] call kind, used for fault injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list`
    List,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

#[derive(Debug, Clone)]
struct Failure {
    operation: Operation,
    /// `None` matches every id.
    id: Option<TaskId>,
    error: ApiError,
}

#[derive(Debug, Default)]
struct Backend {
    tasks: Vec<Task>,
    next_id: u64,
    failures: Vec<Failure>,
    calls: HashMap<Operation, usize>,
}

impl Backend {
    /// Records a call and returns the injected failure for it, if any.
    fn begin(&mut self, operation: Operation, id: Option<TaskId>) -> Result<(), ApiError> {
        *self.calls.entry(operation).or_default() += 1;
        let injected = self
            .failures
            .iter()
            .find(|f| f.operation == operation && (f.id.is_none() || f.id == id));
        match injected {
            Some(failure) => Err(failure.error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(id: TaskId) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("task {id} not found"),
    }
}

/// Shared in-memory task backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskApi {
    backend: Arc<Mutex<Backend>>,
}

impl InMemoryTaskApi {
    /// Creates an empty backend. The first task gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a backend holding `tasks`; new ids continue after the largest.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        Self {
            backend: Arc::new(Mutex::new(Backend {
                tasks,
                next_id,
                ..Backend::default()
            })),
        }
    }

    /// Server-side truth, bypassing fault injection and call counting.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.backend.lock().tasks.clone()
    }

    /// Removes a task server-side, as another client would.
    pub fn remove_task(&self, id: TaskId) -> bool {
        let mut backend = self.backend.lock();
        let before = backend.tasks.len();
        backend.tasks.retain(|t| t.id != id);
        backend.tasks.len() != before
    }

    /// Makes every future `operation` call fail with `error`.
    pub fn fail(&self, operation: Operation, error: ApiError) {
        self.backend.lock().failures.push(Failure {
            operation,
            id: None,
            error,
        });
    }

    /// Makes future `operation` calls on `id` fail with `error`.
    pub fn fail_for(&self, operation: Operation, id: TaskId, error: ApiError) {
        self.backend.lock().failures.push(Failure {
            operation,
            id: Some(id),
            error,
        });
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        self.backend.lock().failures.clear();
    }

    /// Number of calls made for `operation`, including failed ones.
    #[must_use]
    pub fn call_count(&self, operation: Operation) -> usize {
        self.backend
            .lock()
            .calls
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }
}

impl TaskApi for InMemoryTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        tokio::task::yield_now().await;
        let mut backend = self.backend.lock();
        backend.begin(Operation::List, None)?;
        Ok(backend.tasks.clone())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        tokio::task::yield_now().await;
        let mut backend = self.backend.lock();
        backend.begin(Operation::Create, None)?;
        task.validate().map_err(|e| ApiError::Status {
            status: 400,
            message: e.to_string(),
        })?;
        let id = TaskId::new(backend.next_id);
        backend.next_id += 1;
        let created = Task::from_new(id, task.clone());
        backend.tasks.push(created.clone());
        drop(backend);
        Ok(created)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        tokio::task::yield_now().await;
        let mut backend = self.backend.lock();
        backend.begin(Operation::Update, Some(id))?;
        patch.validate().map_err(|e| ApiError::Status {
            status: 400,
            message: e.to_string(),
        })?;
        let task = backend
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        task.apply(patch);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        tokio::task::yield_now().await;
        let mut backend = self.backend.lock();
        backend.begin(Operation::Delete, Some(id))?;
        let index = backend
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        backend.tasks.remove(index);
        Ok(())
    }
}
