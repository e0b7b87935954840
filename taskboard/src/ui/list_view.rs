//! List view: filtered tasks with selection checkboxes.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{EMPTY_STATE, theme};
use crate::app::{App, Focus};

/// Render the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Tasks;
    let visible = app.visible_tasks();

    let all_selected =
        !visible.is_empty() && visible.iter().all(|t| app.snapshot.is_selected(t.id));
    let title = Line::from(vec![
        Span::styled("Tasks", theme::panel_title(theme::TASKS_TITLE)),
        Span::styled(
            format!(" ({}) ", visible.len()),
            theme::dimmed(),
        ),
        Span::styled(
            if all_selected { "[x] all" } else { "[ ] all" },
            theme::dimmed(),
        ),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if app.snapshot.loading && app.snapshot.tasks.is_empty() {
        let paragraph = Paragraph::new("Loading tasks...")
            .style(theme::dimmed())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if visible.is_empty() {
        let paragraph = Paragraph::new(EMPTY_STATE)
            .style(theme::dimmed())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let checkbox = if app.snapshot.is_selected(task.id) {
                "[x]"
            } else {
                "[ ]"
            };

            let line = Line::from(vec![
                Span::styled(checkbox, theme::normal()),
                Span::raw(" "),
                Span::styled(format!("#{:<4}", task.id.get()), theme::dimmed()),
                Span::styled(task.title.as_str(), theme::task_title(task.status)),
                Span::raw("  "),
                Span::styled(
                    task.status.as_str(),
                    theme::normal().fg(theme::status_color(task.status)),
                ),
                Span::raw("  "),
                Span::styled(
                    task.priority.as_str(),
                    theme::normal().fg(theme::priority_color(task.priority)),
                ),
            ]);

            let item = ListItem::new(line);
            if idx == app.cursor && is_focused {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
