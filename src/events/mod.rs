//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: store refreshes and mutations against the expense API
//! - Terminal events: User input and terminal interactions

mod error;
pub mod network;
pub mod terminal;

pub use error::SyncError;
