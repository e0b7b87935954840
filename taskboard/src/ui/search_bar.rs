//! Search input and filter summary.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the search bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Search;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(48)])
        .split(area);

    let mut spans = vec![Span::styled("/ ", theme::dimmed())];
    if app.search_input.is_empty() && !is_focused {
        spans.push(Span::styled("Search tasks...", theme::dimmed()));
    } else {
        spans.push(Span::styled(app.search_input.as_str(), theme::normal()));
    }
    if is_focused {
        spans.push(Span::styled("_", theme::input_cursor()));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled("Search", theme::panel_title(theme::SEARCH_TITLE)))
            .borders(Borders::ALL)
            .border_style(if is_focused {
                theme::highlighted()
            } else {
                theme::normal()
            }),
    );
    frame.render_widget(input, chunks[0]);

    let status = app.query.status.map_or("All", |s| s.as_str());
    let priority = app.query.priority.map_or("All", |p| p.as_str());
    let filters = Line::from(vec![
        Span::styled("Status: ", theme::dimmed()),
        Span::styled(status, theme::bold()),
        Span::styled("  Priority: ", theme::dimmed()),
        Span::styled(priority, theme::bold()),
        Span::styled("  View: ", theme::dimmed()),
        Span::styled(app.query.view.as_str(), theme::bold()),
    ]);
    let filter_box = Paragraph::new(filters).block(
        Block::default()
            .title(Span::styled("Filters", theme::panel_title(theme::SEARCH_TITLE)))
            .borders(Borders::ALL),
    );
    frame.render_widget(filter_box, chunks[1]);
}
