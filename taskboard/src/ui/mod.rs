//! Terminal UI rendering.
//!
//! Every view renders from [`App`] alone: the latest store snapshot plus
//! view state. Nothing here mutates task data.

pub mod kanban_view;
pub mod list_view;
pub mod search_bar;
pub mod status_bar;
pub mod task_form;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use taskboard_proto::query::ViewMode;

use crate::app::App;

/// Shown by both views when no task passes the filters.
pub const EMPTY_STATE: &str = "No tasks found. Create your first task to get started!";

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let banner_height = u16::from(app.snapshot.error.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(banner_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    search_bar::render(frame, chunks[0], app);
    match app.query.view {
        ViewMode::List => list_view::render(frame, chunks[1], app),
        ViewMode::Kanban => kanban_view::render(frame, chunks[1], app),
    }
    status_bar::render_banner(frame, chunks[2], app);
    status_bar::render(frame, chunks[3], app);

    if let Some(form) = &app.form {
        task_form::render(frame, centered(frame.area(), 60, 11), form);
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Renders the whole UI into a test terminal and returns its text, one
/// line per row.
#[cfg(test)]
pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
