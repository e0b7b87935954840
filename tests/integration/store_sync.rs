// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::missing_panics_doc,
    clippy::missing_docs_in_private_items
)]

//! Integration tests for store synchronization over HTTP.
//!
//! Each test starts `taskboard-server` on an ephemeral port and drives a
//! `TaskStore<HttpTaskApi>` against it, checking both the client snapshot
//! and the server's repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use taskboard::api::{ApiError, HttpTaskApi, TaskApi};
use taskboard::store::{StoreError, TaskStore};
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
use taskboard_server::api::start_server_with_repository;
use taskboard_server::store::TaskRepository;

// =============================================================================
// Helpers
// =============================================================================

struct Harness {
    store: TaskStore<HttpTaskApi>,
    repository: Arc<TaskRepository>,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn seed() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(1),
            title: "Buy milk".to_string(),
            status: TaskStatus::Active,
            priority: TaskPriority::Low,
        },
        Task {
            id: TaskId::new(2),
            title: "Write report".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
        },
    ]
}

async fn harness(tasks: Vec<Task>) -> Harness {
    let repository = Arc::new(TaskRepository::with_tasks(tasks));
    let (addr, server) = start_server_with_repository("127.0.0.1:0", Arc::clone(&repository))
        .await
        .unwrap();
    let api = HttpTaskApi::new(&format!("http://{addr}/tasks"), Duration::from_secs(5)).unwrap();
    Harness {
        store: TaskStore::new(api),
        repository,
        server,
    }
}

// =============================================================================
// Fetch
// =============================================================================

#[tokio::test]
async fn ensure_loaded_fetches_server_list() {
    let h = harness(seed()).await;
    assert!(h.store.snapshot().loading);

    h.store.ensure_loaded().await.unwrap();

    let snapshot = h.store.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.tasks, seed());
}

#[tokio::test]
async fn fetch_from_unreachable_server_sets_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = HttpTaskApi::new(
        &format!("http://127.0.0.1:{port}/tasks"),
        Duration::from_secs(2),
    )
    .unwrap();
    let store = TaskStore::new(api);

    let result = store.fetch_all().await;

    assert!(matches!(result, Err(StoreError::Api(ApiError::Transport(_)))));
    let snapshot = store.snapshot();
    assert!(snapshot.tasks.is_empty());
    assert!(!snapshot.loading);
    assert!(
        snapshot
            .error
            .as_deref()
            .unwrap()
            .starts_with("could not reach task api")
    );
}

// =============================================================================
// Create / edit / delete
// =============================================================================

#[tokio::test]
async fn create_then_fetch_yields_task_once() {
    let h = harness(seed()).await;
    h.store.ensure_loaded().await.unwrap();

    let created = h
        .store
        .create(NewTask::new("Call plumber").with_priority(TaskPriority::Urgent))
        .await
        .unwrap();
    assert_eq!(created.id, TaskId::new(3));
    assert_eq!(created.status, TaskStatus::NotStarted);

    h.store.fetch_all().await.unwrap();
    let snapshot = h.store.snapshot();
    let matching: Vec<&Task> = snapshot
        .tasks
        .iter()
        .filter(|t| t.title == "Call plumber")
        .collect();
    assert_eq!(matching, vec![&created]);
}

#[tokio::test]
async fn two_subscribers_each_see_one_call_per_create() {
    let h = harness(Vec::new()).await;
    h.store.ensure_loaded().await.unwrap();

    let counts = [Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0))];
    for count in &counts {
        let count = Arc::clone(count);
        h.store.subscribe(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    h.store.create(NewTask::new("First")).await.unwrap();

    for count in &counts {
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn edit_title_keeps_server_fields() {
    let h = harness(seed()).await;
    h.store.ensure_loaded().await.unwrap();

    let updated = h
        .store
        .edit(TaskId::new(2), TaskPatch::title("X"))
        .await
        .unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(h.store.snapshot().task(TaskId::new(2)), Some(&updated));
    assert_eq!(h.repository.list().await[1], updated);
}

#[tokio::test]
async fn second_delete_is_404_and_changes_nothing() {
    let h = harness(seed()).await;
    h.store.ensure_loaded().await.unwrap();
    h.store.set_selected([TaskId::new(1)]);

    h.store.delete(TaskId::new(1)).await.unwrap();
    let after_first = h.store.snapshot();
    assert!(after_first.task(TaskId::new(1)).is_none());
    assert!(after_first.selected.is_empty());

    let result = h.store.delete(TaskId::new(1)).await;

    match result {
        Err(StoreError::Api(ApiError::Status { status, message })) => {
            assert_eq!(status, 404);
            assert_eq!(message, "task 1 not found");
        }
        other => panic!("expected 404, got {other:?}"),
    }
    assert_eq!(h.store.snapshot().tasks, after_first.tasks);
}

#[tokio::test]
async fn server_rejects_blank_title_with_json_message() {
    let h = harness(Vec::new()).await;

    let err = h.store.api().create(&NewTask::new("  ")).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: "task title is required".to_string(),
        }
    );
    assert!(h.repository.is_empty().await);
}

#[tokio::test]
async fn store_rejects_blank_title_without_request() {
    let h = harness(Vec::new()).await;
    h.store.ensure_loaded().await.unwrap();

    let result = h.store.create(NewTask::new("")).await;

    assert!(matches!(result, Err(StoreError::InvalidTitle(_))));
    assert!(h.repository.is_empty().await);
    assert!(h.store.snapshot().error.is_none());
}

#[tokio::test]
async fn refetch_drops_selection_of_tasks_deleted_elsewhere() {
    let h = harness(seed()).await;
    h.store.ensure_loaded().await.unwrap();
    h.store.set_selected([TaskId::new(1), TaskId::new(2)]);

    h.repository.delete(TaskId::new(2)).await.unwrap();
    h.store.fetch_all().await.unwrap();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.selected.len(), 1);
    assert!(snapshot.is_selected(TaskId::new(1)));
}
