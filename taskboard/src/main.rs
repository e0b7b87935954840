//! `taskboard`: terminal task board.
//!
//! Launches the TUI against a REST task API, or against a built-in
//! in-memory task list with `--demo`. Configuration via CLI flags,
//! environment variables, or config file (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! # Offline demo mode
//! cargo run --bin taskboard -- --demo
//!
//! # Against a running taskboard-server
//! cargo run --bin taskboard -- --api-url http://127.0.0.1:3000/tasks \
//!     --query "view=kanban&status=Active"
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskboard::api::{HttpTaskApi, InMemoryTaskApi, TaskApi};
use taskboard::app::{self, Action, App};
use taskboard::config::{CliArgs, ClientConfig};
use taskboard::store::{StoreError, TaskStore};
use taskboard::ui;
use taskboard_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::from_cli(&cli)
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, demo = config.demo, "taskboard starting");

    // Build the HTTP client before touching the terminal so a bad URL is
    // reported on a normal screen.
    let http_api = if config.demo {
        None
    } else {
        Some(HttpTaskApi::new(&config.api_url, config.request_timeout).map_err(io::Error::other)?)
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = match http_api {
        Some(api) => run_app(&mut terminal, TaskStore::new(api), &config).await,
        None => run_app(&mut terminal, TaskStore::new(demo_backend()), &config).await,
    };

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Sample tasks for `--demo`.
fn demo_backend() -> InMemoryTaskApi {
    let tasks = [
        ("Set up project board", TaskStatus::Completed, TaskPriority::Medium),
        ("Write onboarding guide", TaskStatus::InProgress, TaskPriority::High),
        ("Review open pull requests", TaskStatus::Active, TaskPriority::Urgent),
        ("Plan sprint retrospective", TaskStatus::NotStarted, TaskPriority::Low),
        ("Update dependencies", TaskStatus::NotStarted, TaskPriority::Medium),
    ];
    InMemoryTaskApi::with_tasks(
        tasks
            .into_iter()
            .zip(1..)
            .map(|((title, status, priority), id)| Task {
                id: TaskId::new(id),
                title: title.to_string(),
                status,
                priority,
            })
            .collect(),
    )
}

/// Main application loop.
///
/// Store actions run as spawned tasks; their completion is reported back
/// over a channel so the dialog can show inline results. The store's change
/// notifications only raise a flag, and the loop re-reads the snapshot
/// before drawing.
async fn run_app<A: TaskApi + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: TaskStore<A>,
    client_config: &ClientConfig,
) -> io::Result<()> {
    let store = Arc::new(store);
    let mut app = App::new(
        client_config.initial_query.clone(),
        client_config.search_debounce,
    );

    let dirty = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&dirty);
    let subscription = store.subscribe(move || flag.store(true, Ordering::Release));

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(Action, Result<(), StoreError>)>();

    {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(e) = store.ensure_loaded().await {
                tracing::warn!(error = %e, "initial task fetch failed");
            }
        });
    }

    let result = loop {
        // Step 1: Pick up store changes.
        if dirty.swap(false, Ordering::Acquire) {
            app.sync(store.snapshot());
        }

        // Step 2: Apply finished actions (inline form feedback).
        while let Ok((action, result)) = done_rx.try_recv() {
            app.action_finished(&action, &result);
        }

        // Step 3: Commit debounced search input.
        app.tick(Instant::now());

        // Step 4: Draw the UI frame.
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e);
        }

        // Step 5: Poll for terminal input events.
        match event::poll(client_config.poll_timeout) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e),
        };

        if let Some(action) = app.handle_key_event(key) {
            tracing::debug!(action = action.name(), "dispatching");
            let store = Arc::clone(&store);
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let result = app::perform(&store, action.clone()).await;
                // Receiver is gone only after the loop exits.
                let _ = done_tx.send((action, result));
            });
        }

        if app.should_quit {
            tracing::debug!(query = %app.query_string(), "quitting");
            break Ok(());
        }
    };

    store.unsubscribe(subscription);
    result
}
