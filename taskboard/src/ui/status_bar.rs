//! Status bar and error banner rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use taskboard_proto::query::ViewMode;

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match (app.focus, app.query.view) {
        (Focus::Form, _) => "Enter: save | Tab: next field | Esc: cancel",
        (Focus::Search, _) => "Enter: apply | Esc: back",
        (Focus::Tasks, _) if app.drag.is_dragging() => {
            "←→: choose lane | Enter: drop | Esc: cancel"
        }
        (Focus::Tasks, ViewMode::List) => {
            "n: new | e: edit | d: delete | x: select | a: all | D: delete selected | /: search | s/p: filter | Tab: board | q: quit"
        }
        (Focus::Tasks, ViewMode::Kanban) => {
            "Space: move card | ←→↑↓: navigate | n: new | e: edit | /: search | Tab: list | q: quit"
        }
    };

    let (dot_color, status_text) = if app.snapshot.loading {
        (theme::WARNING, "Loading...".to_string())
    } else if app.snapshot.error.is_some() {
        (theme::ERROR, format!("{} tasks", app.snapshot.tasks.len()))
    } else {
        (theme::SUCCESS, format!("{} tasks", app.snapshot.tasks.len()))
    };

    let mut spans = vec![
        Span::styled("Taskboard", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
    ];
    if !app.snapshot.selected.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} selected", app.snapshot.selected.len()),
            theme::highlighted(),
        ));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

/// Render the latest store error, if any, as a one-line banner.
pub fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(error) = &app.snapshot.error else {
        return;
    };
    let line = Line::from(vec![
        Span::raw(" Error: "),
        Span::raw(error.as_str()),
        Span::raw("  (Esc to dismiss)"),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::error_banner()), area);
}
