//! Create/edit dialog state.

use crossterm::event::{KeyCode, KeyEvent};
use taskboard_proto::task::{
    NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, TitleError, validate_title,
};

/// Inline message for a blank title.
pub const TITLE_REQUIRED: &str = "Task title is required";

/// Whether the dialog creates a task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New task.
    Create,
    /// Existing task.
    Edit(TaskId),
}

/// Field with keyboard focus inside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Title input.
    #[default]
    Title,
    /// Status selector.
    Status,
    /// Priority selector.
    Priority,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Status => Self::Priority,
            Self::Priority => Self::Title,
        }
    }
}

/// What the dialog wants after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Submit a new task.
    Create(NewTask),
    /// Submit changes to an existing task.
    Edit(TaskId, TaskPatch),
    /// Close without saving.
    Close,
}

/// Dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Create or edit.
    pub mode: FormMode,
    /// Title text.
    pub title: String,
    /// Selected status.
    pub status: TaskStatus,
    /// Selected priority.
    pub priority: TaskPriority,
    /// Focused field.
    pub field: FormField,
    /// Inline error: local validation or the store's answer to a submit.
    pub error: Option<String>,
    /// A submit is in flight.
    pub submitting: bool,
}

impl TaskForm {
    /// Empty dialog with the defaults for a fresh task.
    #[must_use]
    pub fn create() -> Self {
        let defaults = NewTask::default();
        Self {
            mode: FormMode::Create,
            title: String::new(),
            status: defaults.status,
            priority: defaults.priority,
            field: FormField::Title,
            error: None,
            submitting: false,
        }
    }

    /// Dialog prefilled from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            field: FormField::Title,
            error: None,
            submitting: false,
        }
    }

    /// Handles a key while the dialog has focus.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Esc => return Some(FormEvent::Close),
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.next().next(),
            _ => match self.field {
                FormField::Title => self.edit_title(key.code),
                FormField::Status => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Right | KeyCode::Left) {
                        self.status = self.status.next();
                    }
                }
                FormField::Priority => {
                    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Right | KeyCode::Left) {
                        self.priority = self.priority.next();
                    }
                }
            },
        }
        None
    }

    fn edit_title(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                self.title.push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.title.pop();
                self.error = None;
            }
            _ => {}
        }
    }

    /// Validates locally and builds the submit event.
    ///
    /// A blank or oversized title keeps the dialog open with an inline error
    /// and produces no event.
    pub fn submit(&mut self) -> Option<FormEvent> {
        if self.submitting {
            return None;
        }
        if let Err(e) = validate_title(&self.title) {
            self.error = Some(match e {
                TitleError::Empty => TITLE_REQUIRED.to_string(),
                TitleError::TooLong => e.to_string(),
            });
            return None;
        }
        self.error = None;
        self.submitting = true;

        let title = self.title.trim().to_string();
        Some(match self.mode {
            FormMode::Create => FormEvent::Create(NewTask {
                title,
                status: self.status,
                priority: self.priority,
            }),
            FormMode::Edit(id) => FormEvent::Edit(
                id,
                TaskPatch {
                    title: Some(title),
                    status: Some(self.status),
                    priority: Some(self.priority),
                },
            ),
        })
    }

    /// Records a failed submit; the dialog stays open.
    pub fn submit_failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}
