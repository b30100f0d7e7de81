//! Client-side validation errors.

/// Reasons a form submission is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No category chosen for the expense
    #[error("Please select a category")]
    MissingCategory,

    /// Amount missing, unparseable or not strictly positive
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// No date given for the expense
    #[error("Please select a date")]
    MissingDate,

    /// Category name blank after trimming
    #[error("Category name is required")]
    EmptyCategoryName,
}
