//! Create/edit dialog rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::theme;
use crate::app::{FormField, FormMode, TaskForm};

/// Render the dialog over the current view.
pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm) {
    let title = match form.mode {
        FormMode::Create => "New task".to_string(),
        FormMode::Edit(id) => format!("Edit task #{id}"),
    };

    let field_label = |field: FormField, label: &'static str| {
        if form.field == field {
            Span::styled(format!("> {label}: "), theme::highlighted())
        } else {
            Span::styled(format!("  {label}: "), theme::dimmed())
        }
    };

    let mut title_spans = vec![
        field_label(FormField::Title, "Title"),
        Span::styled(form.title.as_str(), theme::normal()),
    ];
    if form.field == FormField::Title {
        title_spans.push(Span::styled("_", theme::input_cursor()));
    }

    let mut lines = vec![
        Line::from(title_spans),
        Line::from(vec![
            field_label(FormField::Status, "Status"),
            Span::styled(
                form.status.as_str(),
                theme::normal().fg(theme::status_color(form.status)),
            ),
        ]),
        Line::from(vec![
            field_label(FormField::Priority, "Priority"),
            Span::styled(
                form.priority.as_str(),
                theme::normal().fg(theme::priority_color(form.priority)),
            ),
        ]),
        Line::default(),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            theme::normal().fg(theme::ERROR),
        )));
    } else if form.submitting {
        lines.push(Line::from(Span::styled("Saving...", theme::dimmed())));
    } else {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Enter: save | Tab: next field | Space: change | Esc: cancel",
        theme::dimmed(),
    )));

    let block = Block::default()
        .title(Span::styled(title, theme::bold()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
