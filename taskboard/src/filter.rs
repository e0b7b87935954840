//! Search and filter controller.
//!
//! Pure functions over a task slice. The active criteria come from the
//! [`ViewQuery`], so the visible set is always derivable from the query
//! string.

use taskboard_proto::query::ViewQuery;
use taskboard_proto::task::{Task, TaskPriority, TaskStatus};

/// Criteria applied to the task list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive title substring. Empty matches all.
    pub search: String,
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Exact priority match.
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Derives the filter from the view query.
    #[must_use]
    pub fn from_query(query: &ViewQuery) -> Self {
        Self {
            search: query.search.clone(),
            status: query.status,
            priority: query.priority,
        }
    }

    /// Returns `true` if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.status.is_none() && self.priority.is_none()
    }

    /// Returns `true` if `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_with(task, &self.search.trim().to_lowercase())
    }

    fn matches_with(&self, task: &Task, needle_lower: &str) -> bool {
        (needle_lower.is_empty() || task.title.to_lowercase().contains(needle_lower))
            && self.status.is_none_or(|status| task.status == status)
            && self.priority.is_none_or(|priority| task.priority == priority)
    }
}

/// Returns the tasks matching `filter`, in their original order.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let needle = filter.search.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches_with(task, &needle))
        .collect()
}

/// Groups tasks into the four priority lanes, lowest priority first.
///
/// Order within each lane follows the input order.
#[must_use]
pub fn lanes<'a>(tasks: &[&'a Task]) -> [Vec<&'a Task>; 4] {
    let mut lanes: [Vec<&'a Task>; 4] = Default::default();
    for task in tasks {
        lanes[task.priority.lane()].push(task);
    }
    lanes
}
