//! Appeal Wizard
//!
//! A terminal wizard that helps a driver pick the right administrative
//! appeal against a traffic penalty, either directly from a set of cards
//! or by answering a short yes/no quiz.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod events;
pub mod models;
pub mod navigation;
pub mod prompt;
pub mod quiz;
pub mod selection;

// Common error types
#[derive(Debug)]
pub enum WizardError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Event log persistence error
    PersistenceError(String),
    /// Unknown appeal type tag
    UnknownAppealType(String),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::IoError(err) => write!(f, "I/O error: {}", err),
            WizardError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WizardError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            WizardError::PersistenceError(msg) => write!(f, "Event log error: {}", msg),
            WizardError::UnknownAppealType(tag) => write!(f, "Unknown appeal type: {}", tag),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WizardError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        WizardError::IoError(err)
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for WizardError {
    fn from(err: toml::de::Error) -> Self {
        WizardError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for WizardError {
    fn from(err: toml::ser::Error) -> Self {
        WizardError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;

/// Error handling utilities
pub mod error {
    use super::WizardError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &WizardError) -> String {
        match error {
            WizardError::IoError(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check access to the config and data directories.".to_string()
            }
            WizardError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            WizardError::PersistenceError(_) => {
                "Failed to record the event log. Check disk space and permissions.".to_string()
            }
            WizardError::TuiError(_) => {
                "The terminal could not be set up. Try again with --plain.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "appeal-wizard";
pub const CONFIG_FILE: &str = "appeal-wizard.toml";
pub const EVENTS_FILE: &str = "events.json";
pub const LOG_FILE: &str = "appeal-wizard.log";
pub const DEFAULT_FORM_ROUTE: &str = "/appeals/new";
pub const MAX_EVENT_HISTORY: usize = 500;
