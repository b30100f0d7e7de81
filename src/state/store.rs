//! Local copies of the server-side collections.
//!
//! Stores are only ever replaced wholesale by a refresh response; nothing
//! edits a record in place.

use super::sequence::{RefreshSequence, RefreshToken};
use crate::api::{Category, Expense, Id};
use log::*;

/// Holds the categories as last fetched, in server order.
///
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
    sequence: RefreshSequence,
}

impl CategoryStore {
    pub fn issue(&mut self) -> RefreshToken {
        self.sequence.issue()
    }

    /// Replace the contents with a refresh response. Stale responses are
    /// dropped and false is returned.
    ///
    pub fn apply(&mut self, token: RefreshToken, categories: Vec<Category>) -> bool {
        if !self.sequence.settle(token) {
            warn!("Discarding stale category response {:?}", token);
            return false;
        }
        self.categories = categories;
        true
    }

    /// Record a failed refresh, keeping prior contents. Returns whether the
    /// failure belongs to the latest request.
    ///
    pub fn reject(&mut self, token: RefreshToken) -> bool {
        self.sequence.settle(token)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: Id) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.sequence.is_pending()
    }
}

/// Holds the expenses matching the last applied query.
///
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    total_amount: f64,
    sequence: RefreshSequence,
}

impl ExpenseStore {
    pub fn issue(&mut self) -> RefreshToken {
        self.sequence.issue()
    }

    /// Replace the contents with a refresh response and recompute the total.
    /// Stale responses are dropped and false is returned.
    ///
    pub fn apply(&mut self, token: RefreshToken, expenses: Vec<Expense>) -> bool {
        if !self.sequence.settle(token) {
            warn!("Discarding stale expense response {:?}", token);
            return false;
        }
        self.total_amount = expenses.iter().map(|e| e.amount).sum();
        self.expenses = expenses;
        true
    }

    /// Record a failed refresh, keeping prior contents. Returns whether the
    /// failure belongs to the latest request.
    ///
    pub fn reject(&mut self, token: RefreshToken) -> bool {
        self.sequence.settle(token)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn is_loading(&self) -> bool {
        self.sequence.is_pending()
    }
}
