//! Application-wide error types.
//!
//! Errors that end the application. Failures of individual refreshes and
//! mutations are recovered by the network handler and never reach this type.

use crate::api::ApiError;
use crate::config::ConfigError;

/// Main application error type.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client construction errors
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}
