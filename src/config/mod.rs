//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the API base URL, request timeout, notification lifetime, log level and
//! color theme.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::ui::Theme;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/expense-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub success_notification_secs: u64,
    pub log_level: String,
    pub theme: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_success_notification_secs")]
    pub success_notification_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_success_notification_secs() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "tokyo-night".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            success_notification_secs: default_success_notification_secs(),
            log_level: default_log_level(),
            theme: default_theme(),
            file_path: None,
        }
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config::default()
    }

    /// Load the configuration from the disk using the custom directory if
    /// provided. A missing file is created with default values; missing keys
    /// in an existing file take their defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents =
                fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                    path: file_path.clone(),
                    source: e,
                })?;
            let data: FileSpec = if contents.trim().is_empty() {
                serde_yaml::from_str("{}")
            } else {
                serde_yaml::from_str(&contents)
            }
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.base_url = data.base_url;
            self.request_timeout_secs = data.request_timeout_secs;
            self.success_notification_secs = data.success_notification_secs;
            self.log_level = data.log_level;
            self.theme = data.theme;
        } else {
            self.save()?;
        }

        self.validate()?;
        Ok(())
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// returning any unrecoverable errors.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            success_notification_secs: self.success_notification_secs,
            log_level: self.log_level.clone(),
            theme: self.theme.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Replace the base URL for this run only.
    ///
    pub fn override_base_url(&mut self, base_url: &str) -> Result<(), AppError> {
        self.base_url = base_url.to_string();
        self.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn success_ttl(&self) -> Duration {
        Duration::from_secs(self.success_notification_secs)
    }

    /// Return the configured log level. Validated on load.
    ///
    pub fn log_level(&self) -> Result<LevelFilter, AppError> {
        self.log_level.parse::<LevelFilter>().map_err(|_| {
            ConfigError::InvalidValue {
                field: "log_level",
                message: format!("unknown level '{}'", self.log_level),
            }
            .into()
        })
    }

    /// Return the configured color theme. Validated on load.
    ///
    pub fn theme(&self) -> Result<Theme, AppError> {
        Theme::from_name(&self.theme).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "theme",
                message: format!(
                    "unknown theme '{}', expected one of {}",
                    self.theme,
                    Theme::available_themes().join(", ")
                ),
            }
            .into()
        })
    }

    fn validate(&self) -> Result<(), AppError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                message: format!("'{}' is not an http(s) URL", self.base_url),
            }
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        self.log_level()?;
        self.theme()?;
        Ok(())
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
