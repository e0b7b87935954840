//! Task state store.
//!
//! [`TaskStore`] owns the task snapshot (tasks, selection, loading flag,
//! latest error) and every network call that reads or changes task data.
//! Views never mutate the snapshot: they call store actions and re-render
//! from [`TaskStore::snapshot`] when notified.
//!
//! Notifications are delivered synchronously, after the snapshot lock is
//! released and before the triggering action returns. Each action mutates
//! the snapshot in short critical sections that never span an `.await`.

pub mod subscribers;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::join_all;
use parking_lot::Mutex;
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TitleError};

use crate::api::{ApiError, TaskApi};

pub use subscribers::{SubscriberRegistry, SubscriptionId};

/// Errors returned by store actions.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The title was rejected before any request was sent.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),

    /// The task is not in the local snapshot.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Some deletes of a bulk delete failed.
    ///
    /// Tasks in `deleted` were removed server-side and pruned locally; tasks
    /// in `failed` are still present and still selected.
    #[error(
        "failed to delete {} of {} selected tasks",
        .failed.len(),
        .failed.len() + .deleted.len()
    )]
    BulkDelete {
        /// Ids whose delete succeeded.
        deleted: Vec<TaskId>,
        /// Ids whose delete failed, with the reason.
        failed: Vec<(TaskId, ApiError)>,
    },
}

/// Point-in-time copy of the store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Tasks in server order.
    pub tasks: Vec<Task>,
    /// Selected ids; always a subset of the ids in `tasks`.
    pub selected: BTreeSet<TaskId>,
    /// `true` while a full fetch is in flight (and before the first one).
    pub loading: bool,
    /// Message of the latest failed action, cleared by the next success.
    pub error: Option<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            selected: BTreeSet::new(),
            loading: true,
            error: None,
        }
    }
}

impl Snapshot {
    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: TaskId) -> bool {
        self.selected.contains(&id)
    }

    fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    fn prune_selection(&mut self) {
        let tasks = &self.tasks;
        self.selected.retain(|id| tasks.iter().any(|t| t.id == *id));
    }
}

/// Single source of truth for task data.
///
/// Construct one per application and share it (`Arc<TaskStore<_>>`) with
/// every view.
#[derive(Debug)]
pub struct TaskStore<A> {
    api: A,
    state: Mutex<Snapshot>,
    subscribers: SubscriberRegistry,
    load_started: AtomicBool,
}

impl<A: TaskApi> TaskStore<A> {
    /// Creates a store in the initial state: no tasks, `loading = true`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(Snapshot::default()),
            subscribers: SubscriberRegistry::new(),
            load_started: AtomicBool::new(false),
        }
    }

    /// The backing task API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().clone()
    }

    /// Registers a change callback. See [`SubscriberRegistry::subscribe`].
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Removes a change callback.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Applies `change` under the lock, then notifies subscribers.
    fn mutate<R>(&self, change: impl FnOnce(&mut Snapshot) -> R) -> R {
        let result = {
            let mut state = self.state.lock();
            change(&mut state)
        };
        self.subscribers.notify();
        result
    }

    /// Records a failed action in the snapshot and hands the error back.
    fn fail(&self, action: &'static str, err: StoreError) -> StoreError {
        tracing::warn!(action, error = %err, "task store action failed");
        let message = err.to_string();
        self.mutate(|state| state.error = Some(message));
        err
    }

    /// Runs the first fetch if no fetch has started yet.
    ///
    /// Every view calls this when it mounts; only the first call hits the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns the fetch error of the first call. Later calls return `Ok`.
    pub async fn ensure_loaded(&self) -> Result<(), StoreError> {
        if self.load_started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.fetch_all().await
    }

    /// Replaces the task list with the server's.
    ///
    /// On failure the task list is emptied and the error recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the list request fails.
    pub async fn fetch_all(&self) -> Result<(), StoreError> {
        self.load_started.store(true, Ordering::SeqCst);
        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.list().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "fetched tasks");
                self.mutate(|state| {
                    state.tasks = tasks;
                    state.loading = false;
                    state.prune_selection();
                });
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                tracing::warn!(error = %err, "failed to fetch tasks");
                let message = err.to_string();
                self.mutate(|state| {
                    state.error = Some(message);
                    state.tasks.clear();
                    state.selected.clear();
                    state.loading = false;
                });
                Err(err)
            }
        }
    }

    /// Creates a task and appends the server's copy to the list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTitle`] without sending anything if the
    /// title is blank or too long, or [`StoreError::Api`] if the request
    /// fails.
    pub async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        task.validate()?;

        match self.api.create(&task).await {
            Ok(created) => {
                tracing::info!(task_id = %created.id, "task created");
                let appended = created.clone();
                self.mutate(|state| {
                    state.tasks.push(appended);
                    state.error = None;
                });
                Ok(created)
            }
            Err(e) => Err(self.fail("create task", e.into())),
        }
    }

    /// Applies a partial update and replaces the local task with the
    /// server's representation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTitle`] without sending anything if the
    /// patch carries an invalid title, or [`StoreError::Api`] if the request
    /// fails.
    pub async fn edit(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        patch.validate()?;

        match self.api.update(id, &patch).await {
            Ok(updated) => {
                tracing::info!(task_id = %id, "task updated");
                let replacement = updated.clone();
                self.mutate(|state| {
                    if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == id) {
                        *slot = replacement;
                    }
                    state.error = None;
                });
                Ok(updated)
            }
            Err(e) => Err(self.fail("edit task", e.into())),
        }
    }

    /// Deletes a task once the server confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the request fails; local state is left
    /// untouched apart from the recorded error.
    pub async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(task_id = %id, "task deleted");
                self.mutate(|state| {
                    state.tasks.retain(|t| t.id != id);
                    state.selected.remove(&id);
                    state.error = None;
                });
                Ok(())
            }
            Err(e) => Err(self.fail("delete task", e.into())),
        }
    }

    /// Deletes every selected task, issuing the requests concurrently.
    ///
    /// The selection is captured when the call starts. Tasks whose delete
    /// succeeded are pruned even if others fail; failed tasks stay listed and
    /// selected. An empty selection is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BulkDelete`] if any delete fails.
    pub async fn delete_selected(&self) -> Result<(), StoreError> {
        let ids: Vec<TaskId> = self.state.lock().selected.iter().copied().collect();
        if ids.is_empty() {
            tracing::debug!("no tasks selected for deletion");
            return Ok(());
        }
        tracing::info!(count = ids.len(), "deleting selected tasks");

        let results = join_all(
            ids.iter()
                .map(|&id| async move { (id, self.api.delete(id).await) }),
        )
        .await;

        let mut deleted = Vec::new();
        let mut failed = Vec::new();
        for (id, result) in results {
            match result {
                Ok(()) => deleted.push(id),
                Err(e) => failed.push((id, e)),
            }
        }

        if failed.is_empty() {
            self.mutate(|state| {
                state.tasks.retain(|t| !deleted.contains(&t.id));
                state.selected.clear();
                state.error = None;
            });
            return Ok(());
        }

        for (id, e) in &failed {
            tracing::warn!(task_id = %id, error = %e, "selected task delete failed");
        }
        let err = StoreError::BulkDelete {
            deleted: deleted.clone(),
            failed,
        };
        let message = err.to_string();
        self.mutate(|state| {
            state.tasks.retain(|t| !deleted.contains(&t.id));
            for id in &deleted {
                state.selected.remove(id);
            }
            state.error = Some(message);
        });
        Err(err)
    }

    /// Moves a task to another priority lane, optimistically.
    ///
    /// The local priority changes and subscribers are notified before the
    /// request is sent. If the server rejects the change, the store refetches
    /// the full list to discard the guess and keeps the error visible.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the task is not in the local
    /// list, or [`StoreError::Api`] with the failed patch's error.
    pub async fn reprioritize(&self, id: TaskId, priority: TaskPriority) -> Result<(), StoreError> {
        let applied = {
            let mut state = self.state.lock();
            state
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .map(|task| task.priority = priority)
                .is_some()
        };
        if !applied {
            return Err(StoreError::TaskNotFound(id));
        }
        self.subscribers.notify();
        tracing::debug!(task_id = %id, %priority, "optimistic priority change");

        match self.api.update(id, &TaskPatch::priority(priority)).await {
            Ok(_) => {
                self.mutate(|state| state.error = None);
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                tracing::warn!(task_id = %id, error = %err, "priority change rejected, refetching");
                // A failed refetch records its own state; the patch error wins the banner.
                let _ = self.fetch_all().await;
                let message = err.to_string();
                self.mutate(|state| state.error = Some(message));
                Err(err)
            }
        }
    }

    /// Replaces the selection. Ids not in the task list are dropped.
    pub fn set_selected(&self, ids: impl IntoIterator<Item = TaskId>) {
        let next: BTreeSet<TaskId> = ids.into_iter().collect();
        self.update_selected(move |_| next);
    }

    /// Replaces the selection with a function of the previous one. Ids not
    /// in the task list are dropped.
    pub fn update_selected(&self, update: impl FnOnce(&BTreeSet<TaskId>) -> BTreeSet<TaskId>) {
        self.mutate(|state| {
            let next = update(&state.selected);
            state.selected = next.into_iter().filter(|id| state.contains(*id)).collect();
        });
    }

    /// Flips the selection of one task.
    pub fn toggle_selected(&self, id: TaskId) {
        self.update_selected(|previous| {
            let mut next = previous.clone();
            if !next.remove(&id) {
                next.insert(id);
            }
            next
        });
    }

    /// Selects exactly `ids` (the list view's "select all" over the
    /// filtered tasks).
    pub fn select_all(&self, ids: impl IntoIterator<Item = TaskId>) {
        self.set_selected(ids);
    }

    /// Clears the recorded error (dismissing the banner).
    pub fn dismiss_error(&self) {
        self.mutate(|state| state.error = None);
    }
}
