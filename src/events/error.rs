//! Errors produced by network event handling.

use crate::api::ApiError;
use crate::state::ValidationError;

/// Failure of a refresh or mutation. Always recovered by the network handler,
/// which logs it and shows `to_string()` to the user.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Refused before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request failed; `message` is the server detail or a fallback
    #[error("{message}")]
    Fetch {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl SyncError {
    /// Wrap an API error, preferring the server's detail over `fallback`.
    ///
    pub fn fetch(source: ApiError, fallback: &str) -> Self {
        SyncError::Fetch {
            message: source.user_message(fallback),
            source,
        }
    }
}
