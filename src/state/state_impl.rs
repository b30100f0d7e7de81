use crate::api::{Category, Expense, ExpenseQuery, Id};
use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use std::time::{Duration, Instant};

use super::form::{CategoryForm, ExpenseForm};
use super::navigation::{Focus, Selection};
use super::notification::{Notification, NotificationChannel};
use super::query::QueryController;
use super::sequence::RefreshToken;
use super::store::{CategoryStore, ExpenseStore};

/// Default lifetime of a success notification.
///
pub const DEFAULT_SUCCESS_TTL: Duration = Duration::from_secs(3);

/// Houses data representative of application state.
///
/// The stores are written only through their refresh methods and the query
/// only through the query methods; everything else here is view state.
pub struct State {
    net_sender: Option<NetworkEventSender>,
    categories: CategoryStore,
    expenses: ExpenseStore,
    query: QueryController,
    notifications: NotificationChannel,
    selection: Selection,
    expense_form: ExpenseForm,
    category_form: CategoryForm,
    focus: Focus,
    expense_index: usize,
    category_index: usize,
    spinner_index: usize,
    show_log: bool,
    log: LogBuffer,
    theme: Theme,
}

impl Default for State {
    fn default() -> Self {
        State {
            net_sender: None,
            categories: CategoryStore::default(),
            expenses: ExpenseStore::default(),
            query: QueryController::default(),
            notifications: NotificationChannel::new(DEFAULT_SUCCESS_TTL),
            selection: Selection::None,
            expense_form: ExpenseForm::default(),
            category_form: CategoryForm::default(),
            focus: Focus::default(),
            expense_index: 0,
            category_index: 0,
            spinner_index: 0,
            show_log: false,
            log: LogBuffer::default(),
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        log: LogBuffer,
        success_ttl: Duration,
        theme: Theme,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            notifications: NotificationChannel::new(success_ttl),
            log,
            theme,
            ..State::default()
        }
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_log(&self) -> &LogBuffer {
        &self.log
    }

    // Stores

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.expenses
    }

    /// Issue a token for a category refresh about to be sent.
    ///
    pub fn begin_category_refresh(&mut self) -> RefreshToken {
        self.categories.issue()
    }

    pub fn apply_categories(&mut self, token: RefreshToken, categories: Vec<Category>) -> bool {
        if !self.categories.apply(token, categories) {
            return false;
        }
        self.category_index = clamp_index(self.category_index, self.categories.categories().len());
        true
    }

    pub fn reject_categories(&mut self, token: RefreshToken) -> bool {
        self.categories.reject(token)
    }

    /// Issue a token for an expense refresh of the active query.
    ///
    pub fn begin_expense_refresh(&mut self) -> (RefreshToken, ExpenseQuery) {
        (self.expenses.issue(), self.query.query().clone())
    }

    pub fn apply_expenses(&mut self, token: RefreshToken, expenses: Vec<Expense>) -> bool {
        if !self.expenses.apply(token, expenses) {
            return false;
        }
        self.expense_index = clamp_index(self.expense_index, self.expenses.len());
        true
    }

    pub fn reject_expenses(&mut self, token: RefreshToken) -> bool {
        self.expenses.reject(token)
    }

    // Query

    pub fn query(&self) -> &ExpenseQuery {
        self.query.query()
    }

    pub fn select_category_filter(&mut self, category: Option<Id>) -> &mut Self {
        if self.query.select_category(category).is_some() {
            self.request_expense_refresh();
        }
        self
    }

    pub fn cycle_category_filter(&mut self, forward: bool) -> &mut Self {
        if self
            .query
            .cycle_category(self.categories.categories(), forward)
            .is_some()
        {
            self.request_expense_refresh();
        }
        self
    }

    pub fn toggle_sort_order(&mut self) -> &mut Self {
        self.query.toggle_sort_order();
        self.request_expense_refresh();
        self
    }

    /// Name of the category currently filtered on, or "All Categories".
    ///
    pub fn category_filter_label(&self) -> String {
        match self.query.query().category {
            None => "All Categories".to_string(),
            Some(id) => self
                .categories
                .find(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("Category #{}", id)),
        }
    }

    /// Issue a token for the active query and send the fetch to the network
    /// thread.
    ///
    pub fn request_expense_refresh(&mut self) -> &mut Self {
        let (token, query) = self.begin_expense_refresh();
        debug!("Issuing expense refresh {:?} for {:?}", token, query);
        self.dispatch(NetworkEvent::FetchExpenses { token, query });
        self
    }

    pub fn request_category_refresh(&mut self) -> &mut Self {
        self.dispatch(NetworkEvent::RefreshCategories);
        self
    }

    // Notifications

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn notify_success(&mut self, message: impl Into<String>) -> &mut Self {
        self.notifications.success(message);
        self
    }

    pub fn notify_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.notifications.error(message);
        self
    }

    pub fn dismiss_notification(&mut self) -> &mut Self {
        self.notifications.dismiss();
        self
    }

    /// Advance time-driven view state: expire success messages and step the
    /// spinner.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.notifications.expire(Instant::now());
        self.advance_spinner_index()
    }

    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    // Navigation

    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    /// Switch between the expense table and the category list.
    ///
    pub fn toggle_panel(&mut self) -> &mut Self {
        self.focus = match self.focus {
            Focus::Categories => Focus::Expenses,
            _ => Focus::Categories,
        };
        self
    }

    pub fn next_expense_index(&mut self) -> &mut Self {
        if self.expense_index + 1 < self.expenses.len() {
            self.expense_index += 1;
        }
        self
    }

    pub fn previous_expense_index(&mut self) -> &mut Self {
        self.expense_index = self.expense_index.saturating_sub(1);
        self
    }

    pub fn get_expense_index(&self) -> usize {
        self.expense_index
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub fn next_category_index(&mut self) -> &mut Self {
        if self.category_index + 1 < self.categories.categories().len() {
            self.category_index += 1;
        }
        self
    }

    pub fn previous_category_index(&mut self) -> &mut Self {
        self.category_index = self.category_index.saturating_sub(1);
        self
    }

    pub fn get_category_index(&self) -> usize {
        self.category_index
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories.categories().get(self.category_index)
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    // Expense selection and form

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn expense_form(&self) -> &ExpenseForm {
        &self.expense_form
    }

    /// Open a blank expense form, preselecting the filtered category.
    ///
    pub fn begin_create_expense(&mut self) -> &mut Self {
        self.selection = Selection::None;
        self.expense_form = ExpenseForm::blank(chrono::Local::now().date_naive());
        self.expense_form.category_id = self.query.query().category;
        self.focus = Focus::ExpenseForm;
        self
    }

    /// Open the form on the highlighted expense.
    ///
    pub fn begin_edit_selected_expense(&mut self) -> &mut Self {
        if let Some(expense) = self.selected_expense().cloned() {
            self.expense_form = ExpenseForm::from_expense(&expense);
            self.selection = Selection::Editing(expense);
            self.focus = Focus::ExpenseForm;
        }
        self
    }

    pub fn close_expense_form(&mut self) -> &mut Self {
        if matches!(self.selection, Selection::Editing(_)) {
            self.selection = Selection::None;
        }
        self.expense_form = ExpenseForm::default();
        self.focus = Focus::Expenses;
        self
    }

    pub fn expense_form_push_char(&mut self, c: char) -> &mut Self {
        self.expense_form.push_char(c);
        self
    }

    pub fn expense_form_pop_char(&mut self) -> &mut Self {
        self.expense_form.pop_char();
        self
    }

    pub fn expense_form_next_field(&mut self) -> &mut Self {
        self.expense_form.next_field();
        self
    }

    pub fn expense_form_prev_field(&mut self) -> &mut Self {
        self.expense_form.prev_field();
        self
    }

    pub fn expense_form_cycle_category(&mut self, forward: bool) -> &mut Self {
        self.expense_form
            .cycle_category(self.categories.categories(), forward);
        self
    }

    /// Send the form to the network thread as a create or an update depending
    /// on the selection. Ignored while a previous submit is in flight.
    ///
    pub fn submit_expense_form(&mut self) -> &mut Self {
        if self.expense_form.is_submitting() {
            debug!("Ignoring expense submit while one is in flight");
            return self;
        }
        let draft = self.expense_form.draft();
        let event = match self.selection.editing_id() {
            Some(id) => NetworkEvent::UpdateExpense { id, draft },
            None => NetworkEvent::CreateExpense { draft },
        };
        self.expense_form.set_submitting(true);
        self.dispatch(event);
        self
    }

    /// Close the form after a successful save. `id` is the updated record, or
    /// None for a create. A form that was closed, or has since moved on to
    /// another record, is left alone.
    ///
    pub fn expense_saved(&mut self, id: Option<Id>) -> &mut Self {
        if self.is_awaiting_expense_save(id) {
            self.close_expense_form();
        }
        self
    }

    /// Keep the form as typed so the user can correct it.
    ///
    pub fn expense_submit_failed(&mut self, id: Option<Id>) -> &mut Self {
        if self.is_awaiting_expense_save(id) {
            self.expense_form.set_submitting(false);
        }
        self
    }

    fn is_awaiting_expense_save(&self, id: Option<Id>) -> bool {
        self.focus == Focus::ExpenseForm
            && self.expense_form.is_submitting()
            && self.selection.editing_id() == id
    }

    /// Ask for confirmation before deleting the given expense.
    ///
    pub fn request_delete(&mut self, id: Id) -> &mut Self {
        self.selection = Selection::Confirming(id);
        self
    }

    pub fn request_delete_selected(&mut self) -> &mut Self {
        if let Some(id) = self.selected_expense().map(|e| e.id) {
            self.request_delete(id);
        }
        self
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        if matches!(self.selection, Selection::Confirming(_)) {
            self.selection = Selection::None;
        }
        self
    }

    /// Send the pending delete, if one is awaiting confirmation.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        if let Selection::Confirming(id) = self.selection {
            self.selection = Selection::None;
            self.dispatch(NetworkEvent::DeleteExpense { id });
        }
        self
    }

    // Category form

    pub fn category_form(&self) -> &CategoryForm {
        &self.category_form
    }

    pub fn begin_category_input(&mut self) -> &mut Self {
        self.focus = Focus::CategoryInput;
        self
    }

    pub fn begin_edit_selected_category(&mut self) -> &mut Self {
        if let Some(category) = self.selected_category().cloned() {
            self.category_form.edit(&category);
            self.focus = Focus::CategoryInput;
        }
        self
    }

    pub fn category_input_push_char(&mut self, c: char) -> &mut Self {
        self.category_form.input.push(c);
        self
    }

    pub fn category_input_pop_char(&mut self) -> &mut Self {
        self.category_form.input.pop();
        self
    }

    pub fn cancel_category_input(&mut self) -> &mut Self {
        self.category_form.clear();
        self.focus = Focus::Categories;
        self
    }

    /// Send the category input as a create or a rename. Ignored while a
    /// previous submit is in flight.
    ///
    pub fn submit_category_form(&mut self) -> &mut Self {
        if self.category_form.is_submitting() {
            debug!("Ignoring category submit while one is in flight");
            return self;
        }
        let name = self.category_form.input.clone();
        let event = match self.category_form.editing() {
            Some(category) => NetworkEvent::UpdateCategory {
                id: category.id,
                name,
            },
            None => NetworkEvent::CreateCategory { name },
        };
        self.category_form.set_submitting(true);
        self.dispatch(event);
        self
    }

    /// Clear the input and any edit in progress after a successful save.
    ///
    pub fn category_saved(&mut self) -> &mut Self {
        self.category_form.clear();
        if self.focus == Focus::CategoryInput {
            self.focus = Focus::Categories;
        }
        self
    }

    /// Keep the typed name so the user can correct it.
    ///
    pub fn category_submit_failed(&mut self) -> &mut Self {
        self.category_form.set_submitting(false);
        self
    }

    /// Send an event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
