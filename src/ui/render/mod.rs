mod categories;
mod dialog;
mod expense_form;
mod expenses;
mod footer;
mod header;
mod log;

use self::log::log;
use super::*;
use crate::state::{Focus, State};
use categories::categories;
use dialog::delete_confirmation;
use expense_form::expense_form;
use expenses::expenses;
use footer::footer;
use header::header;
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log panel when shown.
///
const LOG_HEIGHT: u16 = 10;

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.size());
    header(frame, rows[0], state);
    footer(frame, rows[2], state);

    let body = if state.is_log_visible() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(LOG_HEIGHT)])
            .split(rows[1]);
        log(frame, parts[1], state);
        parts[0]
    } else {
        rows[1]
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(body);
    categories(frame, columns[0], state);
    expenses(frame, columns[1], state);

    if state.current_focus() == Focus::ExpenseForm {
        expense_form(frame, body, state);
    }
    if let Some(id) = state.selection().confirming_id() {
        delete_confirmation(frame, body, state, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, Expense};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(state: &State) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_state() -> State {
        let mut state = State::default();
        let token = state.begin_category_refresh();
        state.apply_categories(
            token,
            vec![Category {
                id: 1,
                name: "Food".to_string(),
            }],
        );
        let (token, _) = state.begin_expense_refresh();
        state.apply_expenses(
            token,
            vec![
                Expense {
                    id: 1,
                    category_id: 1,
                    category_name: "Food".to_string(),
                    description: Some("Lunch".to_string()),
                    amount: 10.0,
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                },
                Expense {
                    id: 2,
                    category_id: 1,
                    category_name: "Food".to_string(),
                    description: None,
                    amount: 5.5,
                    date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                },
            ],
        );
        state
    }

    #[test]
    fn renders_panels_and_total() {
        let text = screen_text(&loaded_state());
        assert!(text.contains("Categories"));
        assert!(text.contains("Lunch"));
        assert!(text.contains("Total: 15.50"));
        assert!(text.contains("All Categories"));
        assert!(text.contains("Newest First"));
    }

    #[test]
    fn renders_placeholders_for_empty_lists() {
        let text = screen_text(&State::default());
        assert!(text.contains("No categories found"));
        assert!(text.contains("No expenses found"));
        assert!(text.contains("Total: 0.00"));

        let text = screen_text(&loaded_state());
        assert!(!text.contains("No categories found"));
        assert!(!text.contains("No expenses found"));
    }

    #[test]
    fn renders_notification_in_footer() {
        let mut state = loaded_state();
        state.notify_error("Category already exists");
        assert!(screen_text(&state).contains("Category already exists"));
    }

    #[test]
    fn renders_delete_dialog_and_form() {
        let mut state = loaded_state();
        state.request_delete(1);
        assert!(screen_text(&state).contains("Delete expense"));

        let mut state = loaded_state();
        state.begin_create_expense();
        let text = screen_text(&state);
        assert!(text.contains("Add Expense"));
        assert!(text.contains("Amount"));
    }
}
