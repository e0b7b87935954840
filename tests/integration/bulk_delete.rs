// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::missing_panics_doc,
    clippy::missing_docs_in_private_items
)]

//! Integration tests for deleting the selection.
//!
//! Partial failures are produced the way they happen in practice: another
//! client deletes a selected task on the server before the bulk delete runs,
//! so that one request answers 404.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use taskboard::api::HttpTaskApi;
use taskboard::store::{StoreError, TaskStore};
use taskboard_proto::task::{NewTask, TaskId};
use taskboard_server::api::start_server_with_repository;
use taskboard_server::store::TaskRepository;

async fn loaded_store(
    titles: &[&str],
) -> (
    TaskStore<HttpTaskApi>,
    Arc<TaskRepository>,
    tokio::task::JoinHandle<()>,
) {
    let repository = Arc::new(TaskRepository::new());
    for title in titles {
        repository.create(NewTask::new(*title)).await.unwrap();
    }
    let (addr, server) = start_server_with_repository("127.0.0.1:0", Arc::clone(&repository))
        .await
        .unwrap();
    let api = HttpTaskApi::new(&format!("http://{addr}/tasks"), Duration::from_secs(5)).unwrap();
    let store = TaskStore::new(api);
    store.ensure_loaded().await.unwrap();
    (store, repository, server)
}

fn ids(raw: &[u64]) -> BTreeSet<TaskId> {
    raw.iter().copied().map(TaskId::new).collect()
}

#[tokio::test]
async fn deletes_every_selected_task() {
    let (store, repository, server) = loaded_store(&["a", "b", "c", "d"]).await;
    store.set_selected(ids(&[1, 2, 4]));

    store.delete_selected().await.unwrap();

    let snapshot = store.snapshot();
    let remaining: Vec<u64> = snapshot.tasks.iter().map(|t| t.id.get()).collect();
    assert_eq!(remaining, vec![3]);
    assert!(snapshot.selected.is_empty());
    assert!(snapshot.error.is_none());
    assert_eq!(repository.list().await, snapshot.tasks);
    server.abort();
}

#[tokio::test]
async fn partial_failure_prunes_only_successes() {
    let (store, repository, server) = loaded_store(&["a", "b", "c"]).await;
    store.set_selected(ids(&[1, 2, 3]));
    // Another client removes task 2 first.
    repository.delete(TaskId::new(2)).await.unwrap();

    let result = store.delete_selected().await;

    match &result {
        Err(StoreError::BulkDelete { deleted, failed }) => {
            let deleted: BTreeSet<TaskId> = deleted.iter().copied().collect();
            assert_eq!(deleted, ids(&[1, 3]));
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].0, TaskId::new(2));
            assert!(failed[0].1.is_not_found());
        }
        other => panic!("expected bulk delete error, got {other:?}"),
    }

    let snapshot = store.snapshot();
    let remaining: Vec<u64> = snapshot.tasks.iter().map(|t| t.id.get()).collect();
    assert_eq!(remaining, vec![2]);
    assert_eq!(snapshot.selected, ids(&[2]));
    assert_eq!(
        snapshot.error.as_deref(),
        Some("failed to delete 1 of 3 selected tasks")
    );
    assert!(repository.is_empty().await);
    server.abort();
}

#[tokio::test]
async fn refresh_after_partial_failure_reconciles() {
    let (store, repository, server) = loaded_store(&["a", "b"]).await;
    store.set_selected(ids(&[1, 2]));
    repository.delete(TaskId::new(1)).await.unwrap();
    let _ = store.delete_selected().await;

    store.fetch_all().await.unwrap();

    let snapshot = store.snapshot();
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.selected.is_empty());
    assert!(snapshot.error.is_none());
    server.abort();
}

#[tokio::test]
async fn empty_selection_is_a_no_op() {
    let (store, repository, server) = loaded_store(&["a"]).await;

    store.delete_selected().await.unwrap();

    assert_eq!(store.snapshot().tasks.len(), 1);
    assert_eq!(repository.len().await, 1);
    server.abort();
}
