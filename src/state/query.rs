//! Active filter and sort state for the expense list.

use crate::api::{Category, ExpenseQuery, Id, SortOrder};

/// Owns the active expense query. Every method returns the new query when
/// the call was a real transition and `None` when nothing changed, so the
/// caller issues exactly one refresh per change.
///
#[derive(Debug, Default)]
pub struct QueryController {
    query: ExpenseQuery,
}

impl QueryController {
    pub fn query(&self) -> &ExpenseQuery {
        &self.query
    }

    pub fn select_category(&mut self, category: Option<Id>) -> Option<ExpenseQuery> {
        if self.query.category == category {
            return None;
        }
        self.query.category = category;
        Some(self.query.clone())
    }

    pub fn set_sort_order(&mut self, sort: SortOrder) -> Option<ExpenseQuery> {
        if self.query.sort == sort {
            return None;
        }
        self.query.sort = sort;
        Some(self.query.clone())
    }

    pub fn toggle_sort_order(&mut self) -> ExpenseQuery {
        let sort = self.query.sort.toggled();
        self.set_sort_order(sort);
        self.query.clone()
    }

    /// Move the category filter one step through `[All, categories...]`,
    /// wrapping at both ends. A filter on a category that no longer exists
    /// restarts from All.
    ///
    pub fn cycle_category(
        &mut self,
        categories: &[Category],
        forward: bool,
    ) -> Option<ExpenseQuery> {
        // Slot 0 is "All"; slot i + 1 is categories[i].
        let slots = categories.len() + 1;
        let current = self
            .query
            .category
            .and_then(|id| categories.iter().position(|c| c.id == id))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let category = match next {
            0 => None,
            slot => Some(categories[slot - 1].id),
        };
        self.select_category(category)
    }
}
