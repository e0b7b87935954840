//! Application state and event handling.
//!
//! [`App`] holds view state only. Task data arrives as store snapshots via
//! [`App::sync`]; user intent leaves as an [`Action`] for [`perform`] to run
//! against the store.

pub mod form;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_proto::query::{ViewMode, ViewQuery};
use taskboard_proto::task::{NewTask, Task, TaskId, TaskPatch, TaskPriority};

use crate::api::TaskApi;
use crate::debounce::Debouncer;
use crate::drag::{DragOutcome, DragState};
use crate::filter::{TaskFilter, filter_tasks, lanes};
use crate::store::{Snapshot, StoreError, TaskStore};

pub use form::{FormEvent, FormField, FormMode, TaskForm};

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The list or kanban board.
    #[default]
    Tasks,
    /// The search input.
    Search,
    /// The create/edit dialog.
    Form,
}

/// A store call requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Refetch the task list.
    Refresh,
    /// Create from the dialog.
    Create(NewTask),
    /// Save the dialog's changes.
    Edit(TaskId, TaskPatch),
    /// Delete one task.
    Delete(TaskId),
    /// Delete every selected task.
    DeleteSelected,
    /// Move a task to another lane.
    Reprioritize(TaskId, TaskPriority),
    /// Flip one checkbox.
    ToggleSelected(TaskId),
    /// Replace the selection.
    SetSelection(Vec<TaskId>),
    /// Hide the error banner.
    DismissError,
}

impl Action {
    /// Returns `true` for submits from the dialog, whose result is shown
    /// inline.
    #[must_use]
    pub const fn is_form_submit(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Edit(..))
    }

    /// Short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Create(_) => "create",
            Self::Edit(..) => "edit",
            Self::Delete(_) => "delete",
            Self::DeleteSelected => "delete_selected",
            Self::Reprioritize(..) => "reprioritize",
            Self::ToggleSelected(_) => "toggle_selected",
            Self::SetSelection(_) => "set_selection",
            Self::DismissError => "dismiss_error",
        }
    }
}

/// Runs `action` against the store.
///
/// # Errors
///
/// Returns the store's error for the action.
pub async fn perform<A: TaskApi>(store: &TaskStore<A>, action: Action) -> Result<(), StoreError> {
    match action {
        Action::Refresh => store.fetch_all().await,
        Action::Create(task) => store.create(task).await.map(|_| ()),
        Action::Edit(id, patch) => store.edit(id, patch).await.map(|_| ()),
        Action::Delete(id) => store.delete(id).await,
        Action::DeleteSelected => store.delete_selected().await,
        Action::Reprioritize(id, priority) => store.reprioritize(id, priority).await,
        Action::ToggleSelected(id) => {
            store.toggle_selected(id);
            Ok(())
        }
        Action::SetSelection(ids) => {
            store.select_all(ids);
            Ok(())
        }
        Action::DismissError => {
            store.dismiss_error();
            Ok(())
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Latest store snapshot.
    pub snapshot: Snapshot,
    /// View parameters: layout, committed search, filters, dialog flag.
    pub query: ViewQuery,
    /// Widget with keyboard focus.
    pub focus: Focus,
    /// Focused row in the list view.
    pub cursor: usize,
    /// Focused lane in the kanban view.
    pub lane_cursor: usize,
    /// Focused card within the focused lane.
    pub card_cursor: usize,
    /// Lane-move gesture.
    pub drag: DragState,
    /// Open dialog, if any.
    pub form: Option<TaskForm>,
    /// Search text as typed (committed to `query` after the debounce).
    pub search_input: String,
    search_debounce: Debouncer<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app from the startup query.
    #[must_use]
    pub fn new(query: ViewQuery, search_debounce: Duration) -> Self {
        let form = query.form_open.then(TaskForm::create);
        let focus = if form.is_some() {
            Focus::Form
        } else {
            Focus::Tasks
        };
        Self {
            snapshot: Snapshot::default(),
            search_input: query.search.clone(),
            query,
            focus,
            cursor: 0,
            lane_cursor: 0,
            card_cursor: 0,
            drag: DragState::default(),
            form,
            search_debounce: Debouncer::new(search_debounce),
            should_quit: false,
        }
    }

    /// Replaces the snapshot and keeps cursors in range.
    pub fn sync(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.clamp_cursors();
    }

    /// Tasks passing the active filters, in store order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.snapshot.tasks, &TaskFilter::from_query(&self.query))
    }

    /// Visible tasks grouped by lane.
    #[must_use]
    pub fn visible_lanes(&self) -> [Vec<&Task>; 4] {
        lanes(&self.visible_tasks())
    }

    /// The task under the cursor of the current view.
    #[must_use]
    pub fn focused_task(&self) -> Option<&Task> {
        match self.query.view {
            ViewMode::List => self.visible_tasks().get(self.cursor).copied(),
            ViewMode::Kanban => self
                .visible_lanes()
                .get(self.lane_cursor)
                .and_then(|lane| lane.get(self.card_cursor).copied()),
        }
    }

    /// The current state as a query string.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut query = self.query.clone();
        query.form_open = self.form.as_ref().is_some_and(|f| f.mode == FormMode::Create);
        query.to_query_string()
    }

    /// Commits a debounced search edit once its quiet period has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search_debounce.poll(now) {
            self.commit_search(&text);
        }
    }

    /// Applies the result of a finished [`Action`].
    pub fn action_finished(&mut self, action: &Action, result: &Result<(), StoreError>) {
        if !action.is_form_submit() {
            return;
        }
        match result {
            Ok(()) => self.close_form(),
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.submit_failed(e.to_string());
                }
            }
        }
    }

    /// Handle a key event. Returns the store call it asks for, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return None;
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Search => {
                self.handle_search_key(key);
                None
            }
            Focus::Tasks if self.drag.is_dragging() => self.handle_drag_key(key),
            Focus::Tasks => self.handle_tasks_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let event = self.form.as_mut()?.handle_key(key)?;
        match event {
            FormEvent::Create(task) => Some(Action::Create(task)),
            FormEvent::Edit(id, patch) => Some(Action::Edit(id, patch)),
            FormEvent::Close => {
                self.close_form();
                None
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.search_debounce.cancel();
                let text = self.search_input.clone();
                self.commit_search(&text);
                self.search_input.clone_from(&self.query.search);
                self.focus = Focus::Tasks;
            }
            KeyCode::Esc => {
                if let Some(text) = self.search_debounce.flush() {
                    self.commit_search(&text);
                }
                self.focus = Focus::Tasks;
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.search_debounce
                    .push(self.search_input.clone(), Instant::now());
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_debounce
                    .push(self.search_input.clone(), Instant::now());
            }
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.hover_step(-1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.hover_step(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let outcome = self.drag.release_over_hover();
                self.drag.reset();
                match outcome {
                    DragOutcome::Reprioritize { task, priority } => {
                        self.lane_cursor = priority.lane();
                        Some(Action::Reprioritize(task, priority))
                    }
                    DragOutcome::Cancelled | DragOutcome::Ignored => None,
                }
            }
            KeyCode::Esc => {
                self.drag.cancel();
                self.drag.reset();
                None
            }
            _ => None,
        }
    }

    fn hover_step(&mut self, step: isize) {
        let Some(current) = self.drag.hover_lane() else {
            return;
        };
        if let Some(lane) = current
            .lane()
            .checked_add_signed(step)
            .and_then(TaskPriority::from_lane)
        {
            self.drag.hover(lane);
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Esc => self.snapshot.error.is_some().then_some(Action::DismissError),
            KeyCode::Tab => {
                self.query.view = self.query.view.toggled();
                self.clamp_cursors();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_row(-1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_row(1);
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_lane(-1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_lane(1);
                None
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char('s') => {
                self.query.cycle_status();
                self.clamp_cursors();
                None
            }
            KeyCode::Char('p') => {
                self.query.cycle_priority();
                self.clamp_cursors();
                None
            }
            KeyCode::Char('n') => {
                self.open_form(TaskForm::create());
                None
            }
            KeyCode::Char('e') => {
                let form = self.focused_task().map(TaskForm::edit)?;
                self.open_form(form);
                None
            }
            KeyCode::Enter if self.query.view == ViewMode::List => {
                let form = self.focused_task().map(TaskForm::edit)?;
                self.open_form(form);
                None
            }
            KeyCode::Char('d') => self.focused_task().map(|t| Action::Delete(t.id)),
            KeyCode::Char('D') => {
                (!self.snapshot.selected.is_empty()).then_some(Action::DeleteSelected)
            }
            KeyCode::Char('a') => Some(self.select_all_visible()),
            KeyCode::Char('x') => self.focused_task().map(|t| Action::ToggleSelected(t.id)),
            KeyCode::Char(' ') => match self.query.view {
                ViewMode::List => self.focused_task().map(|t| Action::ToggleSelected(t.id)),
                ViewMode::Kanban => {
                    let (id, origin) = self.focused_task().map(|t| (t.id, t.priority))?;
                    self.drag.grab(id, origin);
                    None
                }
            },
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        }
    }

    /// Select-all checkbox: selects every visible task, or clears the
    /// selection when all of them are already selected.
    fn select_all_visible(&self) -> Action {
        let visible: Vec<TaskId> = self.visible_tasks().iter().map(|t| t.id).collect();
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.snapshot.is_selected(*id));
        if all_selected {
            Action::SetSelection(Vec::new())
        } else {
            Action::SetSelection(visible)
        }
    }

    fn open_form(&mut self, form: TaskForm) {
        self.query.form_open = form.mode == FormMode::Create;
        self.form = Some(form);
        self.focus = Focus::Form;
    }

    fn close_form(&mut self) {
        self.form = None;
        self.query.form_open = false;
        self.focus = Focus::Tasks;
    }

    fn commit_search(&mut self, text: &str) {
        self.query.set_search(text);
        self.clamp_cursors();
    }

    fn move_row(&mut self, step: isize) {
        match self.query.view {
            ViewMode::List => {
                let len = self.visible_tasks().len();
                self.cursor = step_within(self.cursor, step, len);
            }
            ViewMode::Kanban => {
                let len = self
                    .visible_lanes()
                    .get(self.lane_cursor)
                    .map_or(0, Vec::len);
                self.card_cursor = step_within(self.card_cursor, step, len);
            }
        }
    }

    fn move_lane(&mut self, step: isize) {
        if self.query.view == ViewMode::Kanban {
            self.lane_cursor = step_within(self.lane_cursor, step, TaskPriority::ALL.len());
            self.clamp_cursors();
        }
    }

    fn clamp_cursors(&mut self) {
        let visible = self.visible_tasks().len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
        let lane_len = self
            .visible_lanes()
            .get(self.lane_cursor)
            .map_or(0, Vec::len);
        self.card_cursor = self.card_cursor.min(lane_len.saturating_sub(1));
    }
}

fn step_within(index: usize, step: isize, len: usize) -> usize {
    index
        .saturating_add_signed(step)
        .min(len.saturating_sub(1))
}
