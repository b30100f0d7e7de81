use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

/// Render the expense table with the running total in its title.
///
pub fn expenses(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let store = state.expenses();
    let focused = state.current_focus() == Focus::Expenses;

    let header = Row::new(vec!["Date", "Description", "Category", "Amount"])
        .style(styling::accent_text_style(theme));
    let mut rows: Vec<Row> = store
        .expenses()
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(expense.date.format("%Y-%m-%d").to_string()),
                Cell::from(expense.description.clone().unwrap_or_default()),
                Cell::from(expense.category_name.clone()),
                Cell::from(format!("{:>10.2}", expense.amount)),
            ])
            .style(styling::normal_text_style(theme))
        })
        .collect();
    if rows.is_empty() {
        rows.push(
            Row::new(vec![Cell::from(""), Cell::from("No expenses found")])
                .style(styling::muted_text_style(theme)),
        );
    }

    let title = format!(
        "Expenses ({})  Total: {:.2}",
        store.len(),
        store.total_amount()
    );
    let block = Block::default()
        .title(Span::styled(title, styling::active_block_title_style()))
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(theme, focused));
    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(styling::highlighted_item_style(theme));

    let mut table_state = TableState::default();
    if focused && !store.is_empty() {
        table_state.select(Some(state.get_expense_index()));
    }
    frame.render_stateful_widget(table, size, &mut table_state);
}
