use super::Frame;
use crate::api::Id;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Return a rectangle of the given percentage size centered in `area`.
///
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}

/// Render the confirmation prompt for a pending delete.
///
pub fn delete_confirmation(frame: &mut Frame, size: Rect, state: &State, id: Id) {
    let theme = state.get_theme();
    let area = centered_rect(50, 40, size);

    let summary = state
        .expenses()
        .expenses()
        .iter()
        .find(|e| e.id == id)
        .map(|e| {
            format!(
                "{} {} {:.2}",
                e.date.format("%Y-%m-%d"),
                e.description.as_deref().unwrap_or(&e.category_name),
                e.amount
            )
        })
        .unwrap_or_else(|| format!("#{}", id));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete this expense?",
            styling::normal_text_style(theme),
        )),
        Line::from(Span::styled(summary, styling::accent_text_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/y: delete   Esc/n: cancel",
            styling::muted_text_style(theme),
        )),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled("Delete expense", styling::error_style(theme)))
                .borders(Borders::ALL)
                .border_style(styling::error_style(theme)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}
