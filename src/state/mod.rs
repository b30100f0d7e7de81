//! Application state management module.
//!
//! This module contains the synchronization core of the application:
//! - Category and expense stores holding the last server response
//! - The query controller owning the active filter and sort order
//! - The single-slot notification channel
//! - Form and selection state for the dialogs
//! - Client-side validation errors

mod error;
mod form;
mod navigation;
mod notification;
mod query;
mod sequence;
mod state_impl;
mod store;

pub use error::ValidationError;
pub use form::{normalize_category_name, CategoryForm, ExpenseDraft, ExpenseField};
pub use navigation::{Focus, Selection};
pub use notification::NotificationKind;
pub use sequence::RefreshToken;
pub use state_impl::{State, DEFAULT_SUCCESS_TTL};
