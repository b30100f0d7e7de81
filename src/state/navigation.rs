//! Navigation-related state types.
//!
//! This module contains enums for panel focus and the record selection that
//! drives the edit and delete dialogs.

use crate::api::{Expense, Id};

/// Specifying which part of the screen receives key input.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    #[default]
    Expenses,
    Categories,
    CategoryInput,
    ExpenseForm,
}

/// Record-level selection for the expense list.
///
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Editing(Expense),
    Confirming(Id), // Delete requested, waiting for confirmation
}

impl Selection {
    pub fn editing_id(&self) -> Option<Id> {
        match self {
            Selection::Editing(expense) => Some(expense.id),
            _ => None,
        }
    }

    pub fn confirming_id(&self) -> Option<Id> {
        match self {
            Selection::Confirming(id) => Some(*id),
            _ => None,
        }
    }
}
