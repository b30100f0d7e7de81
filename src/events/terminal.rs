use crate::state::{ExpenseField, Focus, Selection, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Block until the next terminal event arrives.
    ///
    pub fn next_event(&self) -> Result<Event<KeyEvent>> {
        Ok(self.rx.recv()?)
    }

    /// Handle a terminal event. Returns true if should continue or false if
    /// exit was requested.
    ///
    pub fn apply(&self, event: Event<KeyEvent>, state: &mut State) -> bool {
        match event {
            Event::Input(key) => handle_key(key, state),
            Event::Tick => {
                state.tick();
                true
            }
        }
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if let Selection::Confirming(_) = state.selection() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                state.confirm_delete();
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.cancel_delete();
            }
            _ => (),
        }
        return true;
    }

    match state.current_focus() {
        Focus::ExpenseForm => handle_expense_form_key(key, state),
        Focus::CategoryInput => handle_category_input_key(key, state),
        Focus::Expenses | Focus::Categories => return handle_panel_key(key, state),
    }
    true
}

fn handle_expense_form_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_expense_form();
        }
        KeyCode::Enter => {
            state.submit_expense_form();
        }
        KeyCode::Tab => {
            state.expense_form_next_field();
        }
        KeyCode::BackTab => {
            state.expense_form_prev_field();
        }
        KeyCode::Left if state.expense_form().field() == ExpenseField::Category => {
            state.expense_form_cycle_category(false);
        }
        KeyCode::Right if state.expense_form().field() == ExpenseField::Category => {
            state.expense_form_cycle_category(true);
        }
        KeyCode::Backspace => {
            state.expense_form_pop_char();
        }
        KeyCode::Char(c) => {
            state.expense_form_push_char(c);
        }
        _ => (),
    }
}

fn handle_category_input_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.cancel_category_input();
        }
        KeyCode::Enter => {
            state.submit_category_form();
        }
        KeyCode::Backspace => {
            state.category_input_pop_char();
        }
        KeyCode::Char(c) => {
            state.category_input_push_char(c);
        }
        _ => (),
    }
}

fn handle_panel_key(key: KeyEvent, state: &mut State) -> bool {
    let on_categories = state.current_focus() == Focus::Categories;
    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Tab => {
            state.toggle_panel();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if on_categories {
                state.next_category_index();
            } else {
                state.next_expense_index();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if on_categories {
                state.previous_category_index();
            } else {
                state.previous_expense_index();
            }
        }
        KeyCode::Char('a') => {
            if on_categories {
                state.begin_category_input();
            } else {
                state.begin_create_expense();
            }
        }
        KeyCode::Char('e') => {
            if on_categories {
                state.begin_edit_selected_category();
            } else {
                state.begin_edit_selected_expense();
            }
        }
        KeyCode::Char('d') if !on_categories => {
            state.request_delete_selected();
        }
        KeyCode::Enter if on_categories => {
            let category = state.selected_category().map(|c| c.id);
            state.select_category_filter(category);
        }
        KeyCode::Char('f') => {
            state.cycle_category_filter(true);
        }
        KeyCode::Char('F') => {
            state.cycle_category_filter(false);
        }
        KeyCode::Char('s') => {
            state.toggle_sort_order();
        }
        KeyCode::Char('r') => {
            state.request_category_refresh().request_expense_refresh();
        }
        KeyCode::Char('x') => {
            state.dismiss_notification();
        }
        KeyCode::Char('L') => {
            state.toggle_log();
        }
        _ => (),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, Expense, SortOrder};
    use crate::events::network::Event as NetworkEvent;
    use crate::logger::LogBuffer;
    use crate::state::DEFAULT_SUCCESS_TTL;
    use crate::ui::Theme;
    use fake::{Fake, Faker};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_channel() -> (State, UnboundedReceiver<NetworkEvent>) {
        let (tx, rx) = unbounded_channel();
        let state = State::new(tx, LogBuffer::default(), DEFAULT_SUCCESS_TTL, Theme::default());
        (state, rx)
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut state = State::default();
        assert!(!handle_key(press(KeyCode::Char('q')), &mut state));
        assert!(!handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state
        ));
        assert!(handle_key(press(KeyCode::Char('j')), &mut state));
    }

    #[test]
    fn q_is_text_inside_forms() {
        let mut state = State::default();
        handle_key(press(KeyCode::Char('a')), &mut state);
        handle_key(press(KeyCode::Tab), &mut state);
        handle_key(press(KeyCode::Tab), &mut state);
        assert_eq!(state.expense_form().field(), ExpenseField::Description);
        assert!(handle_key(press(KeyCode::Char('q')), &mut state));
        assert_eq!(state.expense_form().description, "q");
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.current_focus(), Focus::Expenses);
    }

    #[test]
    fn sort_key_dispatches_refresh() {
        let (mut state, mut rx) = state_with_channel();
        handle_key(press(KeyCode::Char('s')), &mut state);
        assert_eq!(state.query().sort, SortOrder::Oldest);
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::FetchExpenses { .. })
        ));
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let (mut state, mut rx) = state_with_channel();
        let expense: Expense = Faker.fake();
        let (token, _) = state.begin_expense_refresh();
        state.apply_expenses(token, vec![expense.clone()]);

        handle_key(press(KeyCode::Char('d')), &mut state);
        handle_key(press(KeyCode::Char('s')), &mut state);
        assert!(rx.try_recv().is_err());
        handle_key(press(KeyCode::Char('n')), &mut state);
        assert_eq!(state.selection(), &Selection::None);

        handle_key(press(KeyCode::Char('d')), &mut state);
        handle_key(press(KeyCode::Char('y')), &mut state);
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::DeleteExpense { id }) if id == expense.id
        ));
    }

    #[test]
    fn enter_on_category_filters_expenses() {
        let (mut state, mut rx) = state_with_channel();
        let category: Category = Faker.fake();
        let token = state.begin_category_refresh();
        state.apply_categories(token, vec![category.clone()]);

        handle_key(press(KeyCode::Tab), &mut state);
        assert_eq!(state.current_focus(), Focus::Categories);
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.query().category, Some(category.id));
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::FetchExpenses { query, .. }) if query.category == Some(category.id)
        ));
    }

    #[test]
    fn category_input_submits_typed_name() {
        let (mut state, mut rx) = state_with_channel();
        handle_key(press(KeyCode::Tab), &mut state);
        handle_key(press(KeyCode::Char('a')), &mut state);
        for c in "Rent".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_key(press(KeyCode::Enter), &mut state);
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::CreateCategory { name }) if name == "Rent"
        ));
    }
}
