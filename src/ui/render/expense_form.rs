use super::dialog::centered_rect;
use super::Frame;
use crate::state::{ExpenseField, Selection, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the add/edit expense form over the panels.
///
pub fn expense_form(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let form = state.expense_form();
    let area = centered_rect(60, 60, size);

    let category = match form.category_id {
        Some(id) => state
            .categories()
            .find(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id)),
        None => "Select a category".to_string(),
    };
    let fields = [
        (ExpenseField::Category, "Category", format!("< {} >", category)),
        (ExpenseField::Amount, "Amount", form.amount.clone()),
        (ExpenseField::Description, "Description", form.description.clone()),
        (ExpenseField::Date, "Date (YYYY-MM-DD)", form.date.clone()),
    ];

    let mut lines = vec![Line::from("")];
    for (field, label, value) in fields {
        let active = field == form.field();
        let label_style = if active {
            styling::active_list_item_style(theme)
        } else {
            styling::muted_text_style(theme)
        };
        let marker = if active { "> " } else { "  " };
        let cursor = if active && field != ExpenseField::Category {
            "_"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<20}", marker, label), label_style),
            Span::styled(value, styling::normal_text_style(theme)),
            Span::styled(cursor, styling::muted_text_style(theme)),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Tab/Shift-Tab: field   ←/→: category   Enter: save   Esc: cancel",
        styling::muted_text_style(theme),
    )));

    let mut title = match state.selection() {
        Selection::Editing(_) => "Edit Expense".to_string(),
        _ => "Add Expense".to_string(),
    };
    if form.is_submitting() {
        title.push_str(" (saving...)");
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(title, styling::active_block_title_style()))
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}
