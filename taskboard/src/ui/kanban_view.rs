//! Kanban view: one column per priority lane.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use taskboard_proto::task::{Task, TaskPriority};

use super::{EMPTY_STATE, theme};
use crate::app::{App, Focus};

/// Placeholder for a lane with no cards.
pub const EMPTY_LANE: &str = "Drop tasks here";

/// Render the board.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let lanes = app.visible_lanes();

    if !app.snapshot.loading && lanes.iter().all(Vec::is_empty) {
        let block = Block::default()
            .title(Span::styled("Board", theme::panel_title(theme::TASKS_TITLE)))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(EMPTY_STATE)
            .style(theme::dimmed())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (priority, (cards, column)) in TaskPriority::ALL
        .into_iter()
        .zip(lanes.iter().zip(columns.iter()))
    {
        render_lane(frame, *column, app, priority, cards);
    }
}

fn render_lane(frame: &mut Frame, area: Rect, app: &App, priority: TaskPriority, cards: &[&Task]) {
    let lane = priority.lane();
    let is_hovered = app.drag.hover_lane() == Some(priority);
    let is_focused_lane = app.focus == Focus::Tasks && app.lane_cursor == lane;

    let title = Line::from(vec![
        Span::styled(
            priority.as_str(),
            theme::panel_title(theme::priority_color(priority)),
        ),
        Span::styled(format!(" ({})", cards.len()), theme::dimmed()),
    ]);
    let border_style = if is_hovered {
        theme::normal()
            .fg(theme::WARNING)
            .add_modifier(Modifier::BOLD)
    } else if is_focused_lane {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if cards.is_empty() {
        let paragraph = Paragraph::new(EMPTY_LANE)
            .style(theme::dimmed())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let dragged = app.drag.dragged_task();
    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = Line::from(vec![
                Span::styled(format!("#{} ", task.id), theme::dimmed()),
                Span::styled(task.title.as_str(), theme::task_title(task.status)),
            ]);
            let item = ListItem::new(vec![
                line,
                Line::from(Span::styled(
                    format!("  {}", task.status),
                    theme::normal().fg(theme::status_color(task.status)),
                )),
            ]);
            if dragged == Some(task.id) {
                item.style(theme::dragged())
            } else if is_focused_lane && idx == app.card_cursor && !app.drag.is_dragging() {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use taskboard_proto::query::ViewQuery;
    use taskboard_proto::task::{TaskId, TaskStatus};

    use crate::debounce::DEFAULT_SEARCH_DEBOUNCE;
    use crate::store::Snapshot;
    use crate::ui::render_to_string;

    fn board(tasks: Vec<Task>) -> App {
        let mut app = App::new(ViewQuery::parse("view=kanban"), DEFAULT_SEARCH_DEBOUNCE);
        app.sync(Snapshot {
            tasks,
            loading: false,
            ..Snapshot::default()
        });
        app
    }

    #[test]
    fn lanes_show_counts_and_placeholder() {
        let app = board(vec![
            Task {
                id: TaskId::new(1),
                title: "Buy milk".to_string(),
                status: TaskStatus::Active,
                priority: TaskPriority::Low,
            },
            Task {
                id: TaskId::new(2),
                title: "Fix bug".to_string(),
                status: TaskStatus::InProgress,
                priority: TaskPriority::Urgent,
            },
        ]);
        let screen = render_to_string(&app, 100, 14);
        assert!(screen.contains("Low (1)"));
        assert!(screen.contains("Medium (0)"));
        assert!(screen.contains("Urgent (1)"));
        assert!(screen.contains(EMPTY_LANE));
        assert!(screen.contains("Buy milk"));
    }

    #[test]
    fn empty_board_shows_empty_state() {
        let app = board(Vec::new());
        let screen = render_to_string(&app, 100, 14);
        assert!(screen.contains(EMPTY_STATE));
    }

    #[test]
    fn dragging_renders_without_panicking() {
        let mut app = board(vec![Task {
            id: TaskId::new(1),
            title: "Buy milk".to_string(),
            status: TaskStatus::Active,
            priority: TaskPriority::Low,
        }]);
        app.handle_key_event(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        app.handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        let screen = render_to_string(&app, 100, 14);
        assert!(screen.contains("Medium (0)"));
    }
}
