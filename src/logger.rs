//! Custom logging module.
//!
//! This module provides a logger implementation that captures log entries
//! into a bounded buffer shown by the log panel.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of entries kept for the log panel.
///
const MAX_ENTRIES: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Shared, bounded list of formatted log lines. Oldest entries are dropped
/// first.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= MAX_ENTRIES {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Return a copy of the most recent `count` entries, oldest first.
    ///
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(count);
                entries.iter().skip(skip).cloned().collect()
            }
            Err(_) => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

/// Custom logger that captures logs to a buffer
///
pub struct CustomLogger {
    level: LevelFilter,
    buffer: LogBuffer,
}

impl CustomLogger {
    pub fn new(level: LevelFilter, buffer: LogBuffer) -> Self {
        CustomLogger { level, buffer }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies are noisy at debug level
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

/// Install the custom logger globally at the given level and return the
/// buffer it writes to.
///
pub fn init(level: LevelFilter) -> Result<LogBuffer, AppError> {
    let buffer = LogBuffer::default();
    log::set_boxed_logger(Box::new(CustomLogger::new(level, buffer.clone())))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(buffer)
}
