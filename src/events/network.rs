use super::SyncError;
use crate::api::{Api, ExpenseQuery, Id};
use crate::state::{normalize_category_name, ExpenseDraft, RefreshToken, State};
use log::*;
use std::error::Error as StdError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Bootstrap,
    FetchExpenses {
        token: RefreshToken,
        query: ExpenseQuery,
    },
    RefreshCategories,
    CreateExpense {
        draft: ExpenseDraft,
    },
    UpdateExpense {
        id: Id,
        draft: ExpenseDraft,
    },
    DeleteExpense {
        id: Id,
    },
    CreateCategory {
        name: String,
    },
    UpdateCategory {
        id: Id,
        name: String,
    },
}

/// Runs refreshes and mutations against the API and writes their outcome
/// into state.
///
/// Mutations never touch store contents directly: a successful mutation is
/// followed by a refetch so that what is shown is always a server response.
/// Clones share state and connection pool, so each event can run as its own
/// task.
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    api: Api,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: Arc<Mutex<State>>, api: Api) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type. Failures end here: they are logged and
    /// posted to the notification channel.
    ///
    pub async fn handle(&self, event: Event) {
        debug!("Processing network event '{:?}'...", event);
        let result = match event {
            Event::Bootstrap => self.bootstrap().await,
            Event::FetchExpenses { token, query } => self.fetch_expenses(token, query).await,
            Event::RefreshCategories => self.refresh_categories().await,
            Event::CreateExpense { draft } => self.create_expense(draft).await,
            Event::UpdateExpense { id, draft } => self.update_expense(id, draft).await,
            Event::DeleteExpense { id } => self.delete_expense(id).await,
            Event::CreateCategory { name } => self.create_category(&name).await,
            Event::UpdateCategory { id, name } => self.update_category(id, &name).await,
        };
        if let Err(e) = result {
            error!("Failed to handle network event: {}", e);
            let mut source = StdError::source(&e);
            while let Some(err) = source {
                error!("  Caused by: {}", err);
                source = err.source();
            }
            self.state.lock().await.notify_error(e.to_string());
        }
    }

    /// Load categories and expenses for the initial screen.
    ///
    async fn bootstrap(&self) -> Result<(), SyncError> {
        info!("Loading categories and expenses...");
        let (categories, expenses) = tokio::join!(self.refresh_categories(), self.refresh_expenses());
        if let (Err(_), Err(e)) = (&categories, &expenses) {
            error!("Failed to load expenses: {}", e);
        }
        categories?;
        expenses?;
        info!("Loaded initial application data.");
        Ok(())
    }

    /// Refresh the category store.
    ///
    pub async fn refresh_categories(&self) -> Result<(), SyncError> {
        let token = self.state.lock().await.begin_category_refresh();
        match self.api.categories().await {
            Ok(categories) => {
                let count = categories.len();
                if self.state.lock().await.apply_categories(token, categories) {
                    info!("Received {} categories.", count);
                }
                Ok(())
            }
            Err(e) => {
                if self.state.lock().await.reject_categories(token) {
                    Err(SyncError::fetch(e, "Failed to fetch categories"))
                } else {
                    warn!("Ignoring failure of superseded category refresh: {}", e);
                    Ok(())
                }
            }
        }
    }

    /// Refresh the expense store with whatever query is active now.
    ///
    pub async fn refresh_expenses(&self) -> Result<(), SyncError> {
        let (token, query) = self.state.lock().await.begin_expense_refresh();
        self.fetch_expenses(token, query).await
    }

    /// Fetch expenses for an already issued token. The response is applied
    /// only if no newer refresh was issued in the meantime.
    ///
    pub async fn fetch_expenses(
        &self,
        token: RefreshToken,
        query: ExpenseQuery,
    ) -> Result<(), SyncError> {
        match self.api.expenses(&query).await {
            Ok(expenses) => {
                let count = expenses.len();
                if self.state.lock().await.apply_expenses(token, expenses) {
                    info!("Received {} expenses for {:?}.", count, query);
                }
                Ok(())
            }
            Err(e) => {
                if self.state.lock().await.reject_expenses(token) {
                    Err(SyncError::fetch(e, "Failed to fetch expenses"))
                } else {
                    warn!("Ignoring failure of superseded expense refresh: {}", e);
                    Ok(())
                }
            }
        }
    }

    pub async fn create_expense(&self, draft: ExpenseDraft) -> Result<(), SyncError> {
        self.save_expense(None, draft).await
    }

    pub async fn update_expense(&self, id: Id, draft: ExpenseDraft) -> Result<(), SyncError> {
        self.save_expense(Some(id), draft).await
    }

    /// Create (`id` None) or update an expense, then refetch.
    ///
    async fn save_expense(&self, id: Option<Id>, draft: ExpenseDraft) -> Result<(), SyncError> {
        let saved = self.submit_expense(id, &draft).await;
        {
            let mut state = self.state.lock().await;
            match saved {
                Ok(()) => {
                    let message = match id {
                        None => "Expense added successfully!",
                        Some(_) => "Expense updated successfully!",
                    };
                    state.expense_saved(id).notify_success(message);
                }
                Err(e) => {
                    state.expense_submit_failed(id);
                    return Err(e);
                }
            }
        }
        self.refresh_expenses().await
    }

    async fn submit_expense(&self, id: Option<Id>, draft: &ExpenseDraft) -> Result<(), SyncError> {
        let fields = draft.validate()?;
        match id {
            None => {
                info!("Creating expense of {:.2} on {}...", fields.amount, fields.date);
                self.api
                    .create_expense(&fields)
                    .await
                    .map_err(|e| SyncError::fetch(e, "Failed to save expense"))?;
                info!("Expense created.");
            }
            Some(id) => {
                info!("Updating expense {}...", id);
                self.api
                    .update_expense(id, &fields)
                    .await
                    .map_err(|e| SyncError::fetch(e, "Failed to update expense"))?;
                info!("Expense {} updated.", id);
            }
        }
        Ok(())
    }

    /// Delete a confirmed expense, then refetch.
    ///
    pub async fn delete_expense(&self, id: Id) -> Result<(), SyncError> {
        info!("Deleting expense {}...", id);
        self.api
            .delete_expense(id)
            .await
            .map_err(|e| SyncError::fetch(e, "Failed to delete expense"))?;
        info!("Expense {} deleted.", id);
        self.state
            .lock()
            .await
            .notify_success("Expense deleted successfully!");
        self.refresh_expenses().await
    }

    pub async fn create_category(&self, name: &str) -> Result<(), SyncError> {
        self.save_category(None, name).await
    }

    pub async fn update_category(&self, id: Id, name: &str) -> Result<(), SyncError> {
        self.save_category(Some(id), name).await
    }

    /// Create (`id` None) or rename a category, then refetch categories. A
    /// rename also refetches expenses, whose category names come from the
    /// server.
    ///
    async fn save_category(&self, id: Option<Id>, raw_name: &str) -> Result<(), SyncError> {
        let saved = self.submit_category(id, raw_name).await;
        {
            let mut state = self.state.lock().await;
            match saved {
                Ok(()) => {
                    let message = match id {
                        None => "Category added successfully!",
                        Some(_) => "Category updated successfully!",
                    };
                    state.category_saved().notify_success(message);
                }
                Err(e) => {
                    state.category_submit_failed();
                    return Err(e);
                }
            }
        }
        self.refresh_categories().await?;
        if id.is_some() {
            self.refresh_expenses().await?;
        }
        Ok(())
    }

    async fn submit_category(&self, id: Option<Id>, raw_name: &str) -> Result<(), SyncError> {
        let name = normalize_category_name(raw_name)?;
        let saved = match id {
            None => {
                info!("Creating category '{}'...", name);
                self.api.create_category(&name).await
            }
            Some(id) => {
                info!("Renaming category {} to '{}'...", id, name);
                self.api.update_category(id, &name).await
            }
        };
        saved.map_err(|e| SyncError::fetch(e, "Failed to save category"))?;
        info!("Category '{}' saved.", name);
        Ok(())
    }
}
