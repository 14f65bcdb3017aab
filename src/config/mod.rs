//! Configuration management module
//!
//! Handles loading, saving, and validation of the wizard configuration.

use crate::{Result, WizardError, APP_NAME, CONFIG_FILE, DEFAULT_FORM_ROUTE, MAX_EVENT_HISTORY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub mod persistence;

/// Log levels accepted by the `log_level` setting
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Wizard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Path of the appeal form the wizard navigates to
    pub form_route: String,
    /// Default tracing level when RUST_LOG is unset
    pub log_level: String,
    /// Terminal poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Whether analytics events are appended to the on-disk event log
    pub event_log: bool,
    /// Number of events kept in the event log
    pub max_event_history: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            form_route: DEFAULT_FORM_ROUTE.to_string(),
            log_level: "info".to_string(),
            tick_rate_ms: 250,
            event_log: true,
            max_event_history: MAX_EVENT_HISTORY,
        }
    }
}

impl WizardConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.form_route.starts_with('/') {
            return Err(WizardError::ConfigError(format!(
                "Form route must be an absolute path: {}",
                self.form_route
            )));
        }

        if self.form_route.contains('?') || self.form_route.contains('#') {
            return Err(WizardError::ConfigError(
                "Form route must not carry a query string or fragment".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(WizardError::ConfigError(format!(
                "Unknown log level: {} (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        const MIN_TICK_RATE_MS: u64 = 10;
        const MAX_TICK_RATE_MS: u64 = 1000;
        if self.tick_rate_ms < MIN_TICK_RATE_MS || self.tick_rate_ms > MAX_TICK_RATE_MS {
            return Err(WizardError::ConfigError(format!(
                "Tick rate must be between {} and {} ms",
                MIN_TICK_RATE_MS, MAX_TICK_RATE_MS
            )));
        }

        if self.max_event_history == 0 {
            return Err(WizardError::ConfigError(
                "Event history must keep at least one event".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Set the appeal form path
    pub fn with_form_route(mut self, route: impl Into<String>) -> Self {
        self.form_route = route.into();
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the terminal poll interval
    pub fn with_tick_rate_ms(mut self, tick_rate_ms: u64) -> Self {
        self.tick_rate_ms = tick_rate_ms;
        self
    }

    /// Enable or disable the on-disk event log
    pub fn with_event_log(mut self, enabled: bool) -> Self {
        self.event_log = enabled;
        self
    }

    /// Load configuration from `config_path`, writing the defaults there
    /// first if the file doesn't exist yet
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load_from(config_path);
        }

        let config = Self::default();
        config.save_to(config_path)?;
        info!(path = %config_path.display(), "wrote default configuration");
        Ok(config)
    }

    /// Load configuration from an explicit file
    /// Returns default configuration if file doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            WizardError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            WizardError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WizardError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            WizardError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/appeal-wizard/appeal-wizard.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            WizardError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
