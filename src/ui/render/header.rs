use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the active query and the loading indicator.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut spans = vec![
        Span::styled(" Expense Tracker ", styling::accent_text_style(theme)),
        Span::styled("  Filter: ", styling::muted_text_style(theme)),
        Span::styled(
            state.category_filter_label(),
            styling::normal_text_style(theme),
        ),
        Span::styled("  Sort: ", styling::muted_text_style(theme)),
        Span::styled(state.query().sort.label(), styling::normal_text_style(theme)),
    ];
    if state.expenses().is_loading() || state.categories().is_loading() {
        spans.push(Span::styled(
            format!("  {} Loading...", spinner::frame(state.get_spinner_index())),
            styling::warning_style(theme),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}
