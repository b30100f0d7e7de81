//! Form editing state types.
//!
//! This module contains the text-backed expense and category forms and the
//! client-side checks run before a mutation reaches the network.

use super::error::ValidationError;
use crate::api::{Category, Expense, ExpenseFields, Id};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Specifying expense form field focus.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ExpenseField {
    #[default]
    Category,
    Amount,
    Description,
    Date,
}

impl ExpenseField {
    const ORDER: [ExpenseField; 4] = [
        ExpenseField::Category,
        ExpenseField::Amount,
        ExpenseField::Description,
        ExpenseField::Date,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> ExpenseField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> ExpenseField {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Unvalidated expense input.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub category_id: Option<Id>,
    pub description: String,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Check category, amount and date, in that order, and produce the
    /// request body.
    ///
    pub fn validate(&self) -> Result<ExpenseFields, ValidationError> {
        let category_id = self.category_id.ok_or(ValidationError::MissingCategory)?;
        let amount = match self.amount {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err(ValidationError::InvalidAmount),
        };
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        Ok(ExpenseFields {
            category_id,
            description: self.description.clone(),
            amount,
            date,
        })
    }
}

/// Text-backed expense form used for both creating and editing.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub category_id: Option<Id>,
    pub description: String,
    pub amount: String,
    pub date: String,
    field: ExpenseField,
    submitting: bool,
}

impl ExpenseForm {
    /// Return an empty form dated today.
    ///
    pub fn blank(today: NaiveDate) -> Self {
        ExpenseForm {
            date: today.format(DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// Return a form prefilled from an existing record.
    ///
    pub fn from_expense(expense: &Expense) -> Self {
        ExpenseForm {
            category_id: Some(expense.category_id),
            description: expense.description.clone().unwrap_or_default(),
            amount: expense.amount.to_string(),
            date: expense.date.format(DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// Parse the text fields. Anything unparseable becomes a missing value
    /// and is reported by validation.
    ///
    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            category_id: self.category_id,
            description: self.description.trim().to_owned(),
            amount: self.amount.trim().parse::<f64>().ok(),
            date: NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok(),
        }
    }

    pub fn field(&self) -> ExpenseField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    /// Append a typed character to the focused text field.
    ///
    pub fn push_char(&mut self, c: char) {
        match self.field {
            ExpenseField::Category => {}
            ExpenseField::Amount => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.amount.push(c);
                }
            }
            ExpenseField::Description => self.description.push(c),
            ExpenseField::Date => {
                if c.is_ascii_digit() || c == '-' {
                    self.date.push(c);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            ExpenseField::Category => {}
            ExpenseField::Amount => {
                self.amount.pop();
            }
            ExpenseField::Description => {
                self.description.pop();
            }
            ExpenseField::Date => {
                self.date.pop();
            }
        }
    }

    /// Step the chosen category through the list, wrapping at both ends.
    ///
    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        if categories.is_empty() {
            return;
        }
        let len = categories.len();
        let next = match self
            .category_id
            .and_then(|id| categories.iter().position(|c| c.id == id))
        {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.category_id = Some(categories[next].id);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}

/// Trim a category name and refuse it when nothing is left.
///
pub fn normalize_category_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(name.to_owned())
}

/// Category name input plus the category being renamed, if any.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub input: String,
    editing: Option<Category>,
    submitting: bool,
}

impl CategoryForm {
    /// Start renaming the given category with its current name as input.
    ///
    pub fn edit(&mut self, category: &Category) {
        self.input = category.name.clone();
        self.editing = Some(category.clone());
    }

    pub fn editing(&self) -> Option<&Category> {
        self.editing.as_ref()
    }

    /// Forget the input and any edit in progress.
    ///
    pub fn clear(&mut self) {
        *self = CategoryForm::default();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(category_id: Option<Id>, amount: Option<f64>, date: Option<NaiveDate>) -> ExpenseDraft {
        ExpenseDraft {
            category_id,
            description: "Lunch".to_string(),
            amount,
            date,
        }
    }

    #[test]
    fn test_valid_draft() {
        let fields = draft(Some(1), Some(12.5), Some(date(2024, 2, 29)))
            .validate()
            .unwrap();
        assert_eq!(fields.category_id, 1);
        assert_eq!(fields.amount, 12.5);
        assert_eq!(fields.description, "Lunch");
        assert_eq!(fields.date, date(2024, 2, 29));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                draft(Some(1), Some(amount), Some(date(2024, 1, 1))).validate(),
                Err(ValidationError::InvalidAmount)
            );
        }
        assert_eq!(
            draft(Some(1), None, Some(date(2024, 1, 1))).validate(),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            draft(None, Some(0.0), None).validate(),
            Err(ValidationError::MissingCategory)
        );
        assert_eq!(
            draft(Some(1), Some(-1.0), None).validate(),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            draft(Some(1), Some(1.0), None).validate(),
            Err(ValidationError::MissingDate)
        );
    }

    #[test]
    fn test_form_draft_parses_text() {
        let mut form = ExpenseForm::blank(date(2024, 6, 1));
        assert_eq!(form.date, "2024-06-01");
        form.category_id = Some(3);
        form.amount = " 7.25 ".to_string();
        form.description = "  Bus ticket ".to_string();
        let draft = form.draft();
        assert_eq!(draft.amount, Some(7.25));
        assert_eq!(draft.description, "Bus ticket");
        assert_eq!(draft.date, Some(date(2024, 6, 1)));

        form.amount = "abc".to_string();
        form.date = "2024-13-01".to_string();
        let draft = form.draft();
        assert_eq!(draft.amount, None);
        assert_eq!(draft.date, None);
    }

    #[test]
    fn test_form_from_expense() {
        let expense = Expense {
            id: 4,
            category_id: 2,
            category_name: "Food".to_string(),
            description: None,
            amount: 5.5,
            date: date(2023, 12, 24),
        };
        let form = ExpenseForm::from_expense(&expense);
        assert_eq!(form.category_id, Some(2));
        assert_eq!(form.description, "");
        assert_eq!(form.amount, "5.5");
        assert_eq!(form.date, "2023-12-24");
        assert_eq!(form.draft().validate().unwrap().amount, 5.5);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ExpenseForm::default();
        assert_eq!(form.field(), ExpenseField::Category);
        form.push_char('x');
        assert_eq!(form, ExpenseForm::default());

        form.next_field();
        for c in "1x2.5".chars() {
            form.push_char(c);
        }
        assert_eq!(form.amount, "12.5");
        form.pop_char();
        assert_eq!(form.amount, "12.");

        form.next_field();
        form.push_char('T');
        assert_eq!(form.description, "T");

        form.next_field();
        assert_eq!(form.field(), ExpenseField::Date);
        form.next_field();
        assert_eq!(form.field(), ExpenseField::Category);
        form.prev_field();
        assert_eq!(form.field(), ExpenseField::Date);
    }

    #[test]
    fn test_cycle_category() {
        let categories = vec![
            Category {
                id: 1,
                name: "A".to_string(),
            },
            Category {
                id: 2,
                name: "B".to_string(),
            },
        ];
        let mut form = ExpenseForm::default();
        form.cycle_category(&categories, true);
        assert_eq!(form.category_id, Some(1));
        form.cycle_category(&categories, true);
        assert_eq!(form.category_id, Some(2));
        form.cycle_category(&categories, true);
        assert_eq!(form.category_id, Some(1));
        form.cycle_category(&categories, false);
        assert_eq!(form.category_id, Some(2));

        let mut form = ExpenseForm::default();
        form.cycle_category(&[], true);
        assert_eq!(form.category_id, None);
    }

    #[test]
    fn test_normalize_category_name() {
        assert_eq!(
            normalize_category_name(""),
            Err(ValidationError::EmptyCategoryName)
        );
        assert_eq!(
            normalize_category_name("   "),
            Err(ValidationError::EmptyCategoryName)
        );
        assert_eq!(normalize_category_name(" Food "), Ok("Food".to_string()));
    }

    #[test]
    fn test_category_form_edit_and_clear() {
        let mut form = CategoryForm::default();
        let category = Category {
            id: 9,
            name: "Travel".to_string(),
        };
        form.edit(&category);
        assert_eq!(form.input, "Travel");
        assert_eq!(form.editing(), Some(&category));

        form.set_submitting(true);
        form.clear();
        assert_eq!(form, CategoryForm::default());
        assert!(!form.is_submitting());
    }
}
