mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use reqwest::Method;
use std::time::Duration;

/// Responsible for asynchronous interaction with the expense API including
/// transformation of response data into explicitly-defined types.
///
/// Cheap to clone; clones share the underlying connection pool so that
/// several requests can be in flight at once.
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str, timeout: Duration) -> Result<Api, ApiError> {
        debug!("Initializing expense API client for {}...", base_url);
        Ok(Api {
            client: Client::new(base_url, timeout)?,
        })
    }

    /// Returns the expenses matching the query, in server order.
    ///
    pub async fn expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, ApiError> {
        debug!("Requesting expenses for {:?}...", query);
        let expenses: Vec<Expense> = self.client.list("expenses", &query.params()).await?;
        debug!("Retrieved {} expenses", expenses.len());
        Ok(expenses)
    }

    /// Returns every category, in server order.
    ///
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        debug!("Requesting categories...");
        let categories: Vec<Category> = self.client.list("get_categories", &[]).await?;
        debug!("Retrieved {} categories", categories.len());
        Ok(categories)
    }

    pub async fn create_expense(&self, fields: &ExpenseFields) -> Result<(), ApiError> {
        debug!("Creating expense {:?}...", fields);
        self.client
            .send(Method::POST, "expenses", Some(fields))
            .await
    }

    pub async fn update_expense(&self, id: Id, fields: &ExpenseFields) -> Result<(), ApiError> {
        debug!("Updating expense {} with {:?}...", id, fields);
        self.client
            .send(Method::PUT, &format!("update_expense/{}", id), Some(fields))
            .await
    }

    pub async fn delete_expense(&self, id: Id) -> Result<(), ApiError> {
        debug!("Deleting expense {}...", id);
        self.client
            .send::<()>(Method::DELETE, &format!("expenses/{}", id), None)
            .await
    }

    /// Create a category. The name is sent as given; trimming is the
    /// caller's job.
    ///
    pub async fn create_category(&self, name: &str) -> Result<(), ApiError> {
        debug!("Creating category '{}'...", name);
        self.client
            .send(
                Method::POST,
                "save_categories",
                Some(&CategoryBody {
                    category_name: name,
                }),
            )
            .await
    }

    pub async fn update_category(&self, id: Id, name: &str) -> Result<(), ApiError> {
        debug!("Renaming category {} to '{}'...", id, name);
        self.client
            .send(
                Method::PUT,
                &format!("update_categories/{}", id),
                Some(&CategoryBody {
                    category_name: name,
                }),
            )
            .await
    }
}
