//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use taskboard_proto::task::{TaskPriority, TaskStatus};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning / loading indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error banner color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task views.
pub const TASKS_TITLE: Color = Color::Green;

/// Panel title color for the search bar.
pub const SEARCH_TITLE: Color = Color::Blue;

/// Lane accent colors, lowest priority first.
pub const LANE_COLORS: [Color; 4] = [
    Color::Rgb(120, 170, 120),
    Color::Rgb(100, 150, 220),
    Color::Rgb(230, 160, 60),
    Color::Rgb(220, 80, 80),
];

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (hints, empty states).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (cursor row).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for the card being moved.
#[must_use]
pub fn dragged() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD | Modifier::ITALIC)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for the error banner.
#[must_use]
pub fn error_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(120, 20, 20))
        .add_modifier(Modifier::BOLD)
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Accent color of a priority lane.
#[must_use]
pub const fn priority_color(priority: TaskPriority) -> Color {
    LANE_COLORS[priority.lane()]
}

/// Text color for a status badge.
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::NotStarted => FG_SECONDARY,
        TaskStatus::Active => HIGHLIGHT,
        TaskStatus::InProgress => WARNING,
        TaskStatus::Completed => SUCCESS,
    }
}

/// Style for a task title; completed tasks are dimmed and struck through.
#[must_use]
pub fn task_title(status: TaskStatus) -> Style {
    if status == TaskStatus::Completed {
        dimmed().add_modifier(Modifier::CROSSED_OUT)
    } else {
        normal()
    }
}
