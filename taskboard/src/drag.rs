//! Lane-move gesture state machine.
//!
//! A gesture picks a card up from its priority lane, hovers over lanes, and
//! is either released or cancelled. Only a release over a different lane
//! produces [`DragOutcome::Reprioritize`]; the caller forwards that to
//! [`crate::store::TaskStore::reprioritize`].

use taskboard_proto::task::{TaskId, TaskPriority};

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card is picked up.
    Dragging {
        /// Card being moved.
        task: TaskId,
        /// Lane the card came from.
        origin: TaskPriority,
        /// Lane currently under the card.
        hover: TaskPriority,
    },
    /// The card was released over another lane.
    Dropped {
        /// Card that was moved.
        task: TaskId,
        /// Lane it was dropped on.
        target: TaskPriority,
    },
    /// The gesture ended without a move.
    Cancelled,
}

/// What the caller should do after a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Move the task to `priority`.
    Reprioritize {
        /// Task to update.
        task: TaskId,
        /// New priority.
        priority: TaskPriority,
    },
    /// Released over its own lane, off every lane, or cancelled.
    Cancelled,
    /// No gesture was in progress.
    Ignored,
}

impl DragState {
    /// Returns `true` while a card is picked up.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The card being dragged, if any.
    #[must_use]
    pub const fn dragged_task(&self) -> Option<TaskId> {
        match self {
            Self::Dragging { task, .. } => Some(*task),
            _ => None,
        }
    }

    /// The lane under the card, if dragging.
    #[must_use]
    pub const fn hover_lane(&self) -> Option<TaskPriority> {
        match self {
            Self::Dragging { hover, .. } => Some(*hover),
            _ => None,
        }
    }

    /// Picks up `task` from lane `origin`.
    ///
    /// Starts a new gesture from any state except `Dragging`, which is left
    /// unchanged.
    pub const fn grab(&mut self, task: TaskId, origin: TaskPriority) {
        if self.is_dragging() {
            return;
        }
        *self = Self::Dragging {
            task,
            origin,
            hover: origin,
        };
    }

    /// Moves the card over `lane`. Ignored unless dragging.
    pub const fn hover(&mut self, lane: TaskPriority) {
        if let Self::Dragging { hover, .. } = self {
            *hover = lane;
        }
    }

    /// Ends the gesture over `lane`, or off every lane for `None`.
    pub const fn release(&mut self, lane: Option<TaskPriority>) -> DragOutcome {
        let Self::Dragging { task, origin, .. } = *self else {
            return DragOutcome::Ignored;
        };
        match lane {
            Some(target) if !matches_lane(target, origin) => {
                *self = Self::Dropped { task, target };
                DragOutcome::Reprioritize {
                    task,
                    priority: target,
                }
            }
            _ => {
                *self = Self::Cancelled;
                DragOutcome::Cancelled
            }
        }
    }

    /// Ends the gesture over the lane currently hovered.
    pub const fn release_over_hover(&mut self) -> DragOutcome {
        let lane = self.hover_lane();
        self.release(lane)
    }

    /// Abandons the gesture.
    pub const fn cancel(&mut self) -> DragOutcome {
        if self.is_dragging() {
            *self = Self::Cancelled;
            DragOutcome::Cancelled
        } else {
            DragOutcome::Ignored
        }
    }

    /// Returns to `Idle` from a finished gesture. Ignored while dragging.
    pub const fn reset(&mut self) {
        if !self.is_dragging() {
            *self = Self::Idle;
        }
    }
}

const fn matches_lane(a: TaskPriority, b: TaskPriority) -> bool {
    a.lane() == b.lane()
}
