//! View query parameters.
//!
//! The board's navigation state lives in a URL-style query string:
//! `view`, `search`, `status`, `priority`, and `form`. Navigation and
//! search widgets write it; the filter controller reads it.

use std::fmt;

use url::form_urlencoded;

use crate::task::{TaskPriority, TaskStatus};

/// Which board layout is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Table of tasks (default).
    #[default]
    List,
    /// Four priority lanes.
    Kanban,
}

impl ViewMode {
    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Kanban => "kanban",
        }
    }

    /// The other layout.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Kanban,
            Self::Kanban => Self::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed view query.
///
/// Unknown keys are ignored. An unrecognized `view` falls back to
/// [`ViewMode::List`]; unrecognized `status` or `priority` values are
/// treated as "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    /// Active layout.
    pub view: ViewMode,
    /// Committed search text.
    pub search: String,
    /// Status filter.
    pub status: Option<TaskStatus>,
    /// Priority filter.
    pub priority: Option<TaskPriority>,
    /// Whether the creation dialog is open (`form=open`).
    pub form_open: bool,
}

impl ViewQuery {
    /// Parses a query string, with or without a leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "view" => {
                    parsed.view = if value == "kanban" {
                        ViewMode::Kanban
                    } else {
                        ViewMode::List
                    };
                }
                "search" => parsed.search = value.into_owned(),
                "status" => parsed.status = value.parse().ok(),
                "priority" => parsed.priority = value.parse().ok(),
                "form" => parsed.form_open = value == "open",
                _ => {}
            }
        }

        parsed
    }

    /// Serializes back to a query string without a leading `?`.
    ///
    /// Default values (list view, empty search, no filters, closed form)
    /// are omitted.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.view != ViewMode::List {
            serializer.append_pair("view", self.view.as_str());
        }
        if !self.search.trim().is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if let Some(status) = self.status {
            serializer.append_pair("status", status.as_str());
        }
        if let Some(priority) = self.priority {
            serializer.append_pair("priority", priority.as_str());
        }
        if self.form_open {
            serializer.append_pair("form", "open");
        }
        serializer.finish()
    }

    /// Commits typed search text. Whitespace-only input clears the search.
    pub fn set_search(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.search.clear();
        } else {
            text.clone_into(&mut self.search);
        }
    }

    /// Advances the status filter: none, then each status, then none again.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TaskStatus::ALL[0]),
            Some(TaskStatus::Completed) => None,
            Some(status) => Some(status.next()),
        };
    }

    /// Advances the priority filter: none, then each priority, then none again.
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(TaskPriority::ALL[0]),
            Some(TaskPriority::Urgent) => None,
            Some(priority) => Some(priority.next()),
        };
    }
}
