use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let buffer = state.get_log();
    let visible = size.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = buffer
        .tail(visible)
        .into_iter()
        .map(|entry| {
            let style = if entry.contains(" ERROR ") {
                styling::error_style(theme)
            } else if entry.contains(" WARN ") {
                styling::warning_style(theme)
            } else {
                styling::muted_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(entry, style)))
        })
        .collect();

    let block = Block::default()
        .title(format!("Log ({}) L: hide", buffer.len()))
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(List::new(items).block(block), size);
}
