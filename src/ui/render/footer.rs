use super::Frame;
use crate::state::{Focus, NotificationKind, Selection, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Return the key hints for the current focus.
///
fn hints(state: &State) -> &'static str {
    if let Selection::Confirming(_) = state.selection() {
        return "Enter/y: confirm delete  Esc/n: cancel";
    }
    match state.current_focus() {
        Focus::Expenses => {
            "j/k: move  a: add  e: edit  d: delete  f/F: filter  s: sort  r: refresh  Tab: categories  L: log  q: quit"
        }
        Focus::Categories => {
            "j/k: move  Enter: filter  a: add  e: rename  f/F: filter  s: sort  r: refresh  Tab: expenses  q: quit"
        }
        Focus::CategoryInput => "Type a name  Enter: save  Esc: cancel",
        Focus::ExpenseForm => "Tab/Shift-Tab: field  ←/→: category  Enter: save  Esc: cancel",
    }
}

/// Render the current notification, or key hints when there is none.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = match state.notification() {
        Some(notification) => match notification.kind {
            NotificationKind::Success => Line::from(Span::styled(
                format!(" ✓ {}", notification.message),
                styling::success_style(theme),
            )),
            NotificationKind::Error => Line::from(vec![
                Span::styled(
                    format!(" ✗ {}", notification.message),
                    styling::error_style(theme),
                ),
                Span::styled("  (x: dismiss)", styling::muted_text_style(theme)),
            ]),
        },
        None => Line::from(Span::styled(
            format!(" {}", hints(state)),
            styling::muted_text_style(theme),
        )),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(line).block(block), size);
}
