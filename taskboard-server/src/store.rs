//! In-memory task repository.
//!
//! The [`TaskRepository`] holds the task collection in insertion order and
//! assigns ids from a monotonically increasing counter. Ids are never reused,
//! so a deleted id stays unknown for the lifetime of the server.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch, TitleError};
use tokio::sync::RwLock;

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No task has the given id.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The title failed validation.
    #[error("{0}")]
    InvalidTitle(#[from] TitleError),
    /// Every id up to `u64::MAX` has been handed out.
    #[error("no task ids left to assign")]
    IdsExhausted,
}

/// Errors that can occur when loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Failed to read the seed file.
    #[error("failed to read seed file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of tasks.
    #[error("failed to parse seed file: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// Two seeded tasks share an id.
    #[error("seed file contains task id {0} more than once")]
    DuplicateId(TaskId),
}

struct Inner {
    tasks: Vec<Task>,
    /// `None` once `u64::MAX` has been assigned.
    next_id: Option<u64>,
}

/// Thread-safe task collection.
pub struct TaskRepository {
    inner: RwLock<Inner>,
}

impl Default for TaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository {
    /// Creates an empty repository. The first task gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a repository pre-populated with `tasks`.
    ///
    /// New ids continue after the largest seeded id. Later tasks with an
    /// already seen id are dropped.
    #[must_use]
    pub fn with_tasks(mut tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        tasks.retain(|task| {
            let first = seen.insert(task.id);
            if !first {
                tracing::warn!(task_id = %task.id, "dropping seeded task with duplicate id");
            }
            first
        });
        let next_id = tasks
            .iter()
            .map(|t| t.id.get())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        Self {
            inner: RwLock::new(Inner { tasks, next_id }),
        }
    }

    /// Returns every task in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    /// Returns the number of stored tasks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    /// Returns `true` if no tasks are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.tasks.is_empty()
    }

    /// Stores a new task and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidTitle`] if the title is blank or
    /// too long, or [`RepositoryError::IdsExhausted`] if no id is left.
    pub async fn create(&self, new: NewTask) -> Result<Task, RepositoryError> {
        new.validate()?;
        let mut inner = self.inner.write().await;
        let raw = inner.next_id.ok_or(RepositoryError::IdsExhausted)?;
        inner.next_id = raw.checked_add(1);
        let id = TaskId::new(raw);
        let task = Task::from_new(id, new);
        inner.tasks.push(task.clone());
        drop(inner);
        Ok(task)
    }

    /// Applies a partial update and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidTitle`] if the patch carries an
    /// invalid title, or [`RepositoryError::NotFound`] for an unknown id.
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, RepositoryError> {
        patch.validate()?;
        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        task.apply(patch);
        Ok(task.clone())
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: TaskId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(RepositoryError::NotFound(id))?;
        inner.tasks.remove(index);
        Ok(())
    }
}

/// Reads a JSON array of tasks to seed the repository with.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or parsed, or if two
/// tasks share an id.
pub fn load_seed_file(path: &Path) -> Result<Vec<Task>, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_seed(&contents)
}

fn parse_seed(contents: &str) -> Result<Vec<Task>, SeedError> {
    let tasks: Vec<Task> = serde_json::from_str(contents)?;
    let mut seen = HashSet::new();
    if let Some(task) = tasks.iter().find(|task| !seen.insert(task.id)) {
        return Err(SeedError::DuplicateId(task.id));
    }
    Ok(tasks)
}
