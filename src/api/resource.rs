use chrono::NaiveDate;
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier for categories and expenses.
///
pub type Id = i64;

/// Defines category data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(alias = "category_name")]
    pub name: String,
}

/// Defines expense data structure as returned by the server.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Id,
    pub category_id: Id,
    #[serde(default)]
    pub category_name: String, // Denormalized by the server, read-only
    #[serde(default)]
    pub description: Option<String>,
    #[dummy(faker = "0.01..10000.0")]
    pub amount: f64,
    pub date: NaiveDate,
}

/// Request body for creating or updating an expense. Only built from a
/// validated draft.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseFields {
    pub category_id: Id,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Request body for creating or renaming a category.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct CategoryBody<'a> {
    pub category_name: &'a str,
}

/// Specifying expense sort order.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    /// Return the value sent as the `sort` query parameter.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Return the opposite order.
    ///
    pub fn toggled(&self) -> SortOrder {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
        }
    }
}

/// Composite filter and sort parameters for listing expenses.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExpenseQuery {
    pub category: Option<Id>, // None = all categories
    pub sort: SortOrder,
}

impl ExpenseQuery {
    /// Return the query parameters for the list request. The category filter
    /// is omitted when unset.
    ///
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(category) = self.category {
            params.push(("category_id", category.to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params
    }
}
