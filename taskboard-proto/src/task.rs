//! Task resource types for the `Taskboard` REST API.
//!
//! Defines the task model exchanged with the task collection endpoint,
//! the create and partial-update payloads, and title validation shared by
//! client and server. Status and priority travel as their display names
//! (`"In Progress"`, `"Urgent"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Server-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors produced when parsing status or priority names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseFieldError {
    /// The string is not a known task status.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),
    /// The string is not a known task priority.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task has not been started.
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Task is active.
    Active,
    /// Task is being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task is done.
    Completed,
}

impl TaskStatus {
    /// All statuses in form order.
    pub const ALL: [Self; 4] = [
        Self::NotStarted,
        Self::Active,
        Self::InProgress,
        Self::Completed,
    ];

    /// Display name, identical to the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Active => "Active",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// The next status in form order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::Active,
            Self::Active => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::NotStarted,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseFieldError;

    /// Parses a display name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError::UnknownStatus(s.to_string()))
    }
}

/// Urgency of a task. Each priority is one kanban lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Lowest urgency.
    #[default]
    Low,
    /// Normal urgency.
    Medium,
    /// Elevated urgency.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// All priorities in lane order (left to right on the board).
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Display name, identical to the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// The next priority in lane order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Urgent,
            Self::Urgent => Self::Low,
        }
    }

    /// Zero-based lane index.
    #[must_use]
    pub const fn lane(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }

    /// Priority for a lane index, if in range.
    #[must_use]
    pub fn from_lane(lane: usize) -> Option<Self> {
        Self::ALL.get(lane).copied()
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseFieldError;

    /// Parses a display name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError::UnknownPriority(s.to_string()))
    }
}

/// Reasons a title is rejected before it is persisted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or whitespace only.
    #[error("task title is required")]
    Empty,
    /// Title exceeds [`MAX_TASK_TITLE_LENGTH`] characters.
    #[error("task title too long (max 256 characters)")]
    TooLong,
}

/// Checks a title against the persistence rules.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for blank titles and
/// [`TitleError::TooLong`] for titles over [`MAX_TASK_TITLE_LENGTH`]
/// characters.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.trim().is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > MAX_TASK_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(())
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, immutable once assigned.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Progress state.
    pub status: TaskStatus,
    /// Urgency (kanban lane).
    pub priority: TaskPriority,
}

impl Task {
    /// Builds a persisted task from a create payload and its assigned id.
    #[must_use]
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        Self {
            id,
            title: new.title,
            status: new.status,
            priority: new.priority,
        }
    }

    /// Applies the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Create payload: task fields without an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTask {
    /// Title, validated before sending.
    pub title: String,
    /// Initial status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Initial priority.
    #[serde(default)]
    pub priority: TaskPriority,
}

impl NewTask {
    /// A new task with the given title and default status and priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Validates the title.
    ///
    /// # Errors
    ///
    /// See [`validate_title`].
    pub fn validate(&self) -> Result<(), TitleError> {
        validate_title(&self.title)
    }
}

/// Partial update payload. Absent fields stay unchanged on the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// A patch that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch that only changes the priority.
    #[must_use]
    pub fn priority(priority: TaskPriority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.priority.is_none()
    }

    /// Validates the title when the patch carries one.
    ///
    /// # Errors
    ///
    /// See [`validate_title`].
    pub fn validate(&self) -> Result<(), TitleError> {
        self.title.as_deref().map_or(Ok(()), validate_title)
    }
}

impl From<&Task> for TaskPatch {
    /// A full-field patch carrying every mutable field of `task`.
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            status: Some(task.status),
            priority: Some(task.priority),
        }
    }
}
