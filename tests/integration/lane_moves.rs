// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::missing_panics_doc,
    clippy::missing_docs_in_private_items
)]

//! Integration tests for moving cards between priority lanes.
//!
//! Drives the kanban gesture through `App` key handling, runs the resulting
//! action against a `TaskStore<HttpTaskApi>`, and checks the optimistic
//! update, the server state, and the reconciliation after a rejected move.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parking_lot::Mutex;
use taskboard::api::HttpTaskApi;
use taskboard::app::{self, Action, App};
use taskboard::debounce::DEFAULT_SEARCH_DEBOUNCE;
use taskboard::store::{StoreError, TaskStore};
use taskboard_proto::query::ViewQuery;
use taskboard_proto::task::{Task, TaskId, TaskPriority, TaskStatus};
use taskboard_server::api::start_server_with_repository;
use taskboard_server::store::TaskRepository;

struct Board {
    store: Arc<TaskStore<HttpTaskApi>>,
    repository: Arc<TaskRepository>,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for Board {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn board() -> Board {
    let repository = Arc::new(TaskRepository::with_tasks(vec![
        Task {
            id: TaskId::new(1),
            title: "Buy milk".to_string(),
            status: TaskStatus::Active,
            priority: TaskPriority::Low,
        },
        Task {
            id: TaskId::new(2),
            title: "Fix login bug".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Urgent,
        },
    ]));
    let (addr, server) = start_server_with_repository("127.0.0.1:0", Arc::clone(&repository))
        .await
        .unwrap();
    let api = HttpTaskApi::new(&format!("http://{addr}/tasks"), Duration::from_secs(5)).unwrap();
    let store = Arc::new(TaskStore::new(api));
    store.ensure_loaded().await.unwrap();
    Board {
        store,
        repository,
        server,
    }
}

fn press(app: &mut App, code: KeyCode) -> Option<Action> {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

#[tokio::test]
async fn keyboard_gesture_moves_card_on_server() {
    let board = board().await;
    let mut app = App::new(ViewQuery::parse("view=kanban"), DEFAULT_SEARCH_DEBOUNCE);
    app.sync(board.store.snapshot());

    assert_eq!(press(&mut app, KeyCode::Char(' ')), None);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    let action = press(&mut app, KeyCode::Enter).unwrap();
    assert_eq!(action, Action::Reprioritize(TaskId::new(1), TaskPriority::High));

    app::perform(&board.store, action).await.unwrap();
    app.sync(board.store.snapshot());

    let lanes = app.visible_lanes();
    assert!(lanes[TaskPriority::Low.lane()].is_empty());
    assert_eq!(lanes[TaskPriority::High.lane()][0].id, TaskId::new(1));
    assert_eq!(board.repository.list().await[0].priority, TaskPriority::High);
}

#[tokio::test]
async fn move_is_visible_before_the_server_answers() {
    let board = board().await;
    let seen = Arc::new(Mutex::new(Vec::new()));

    let observer = Arc::clone(&board.store);
    let log = Arc::clone(&seen);
    board.store.subscribe(move || {
        let priority = observer
            .snapshot()
            .task(TaskId::new(2))
            .map(|t| t.priority);
        log.lock().push(priority);
    });

    board
        .store
        .reprioritize(TaskId::new(2), TaskPriority::Medium)
        .await
        .unwrap();

    let seen = seen.lock().clone();
    assert_eq!(seen.first(), Some(&Some(TaskPriority::Medium)));
    assert!(seen.iter().all(|p| *p == Some(TaskPriority::Medium)));
}

#[tokio::test]
async fn rejected_move_is_rolled_back_by_refetch() {
    let board = board().await;
    // Task 1 disappears server-side: the patch answers 404.
    board.repository.delete(TaskId::new(1)).await.unwrap();

    let result = board
        .store
        .reprioritize(TaskId::new(1), TaskPriority::Urgent)
        .await;

    assert!(matches!(result, Err(StoreError::Api(ref e)) if e.is_not_found()));
    let snapshot = board.store.snapshot();
    assert!(snapshot.task(TaskId::new(1)).is_none());
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("request failed with status 404: task 1 not found")
    );
}

#[tokio::test]
async fn unknown_card_is_rejected_locally() {
    let board = board().await;

    let result = board
        .store
        .reprioritize(TaskId::new(42), TaskPriority::High)
        .await;

    assert_eq!(result, Err(StoreError::TaskNotFound(TaskId::new(42))));
    assert_eq!(board.repository.len().await, 2);
}
