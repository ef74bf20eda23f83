//! Plugin settings
//!
//! Controls how much the plugin writes to its diagnostic log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::PluginPaths;
use crate::diagnostics::{LogLevel, PluginLogger};
use crate::error::PhantomError;

/// Default name of the plugin log
pub const DEFAULT_LOG_FILE_NAME: &str = "SC4RemovePhantomBudgetItems.log";

/// Settings for phantom-budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Least severe log level that is written
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file name, relative to the base directory
    #[serde(default = "default_log_file_name")]
    pub log_file_name: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_file_name() -> String {
    DEFAULT_LOG_FILE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: LogLevel::default(),
            log_file_name: default_log_file_name(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use the defaults if the file doesn't exist
    pub fn load_or_create(paths: &PluginPaths) -> Result<Self, PhantomError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PhantomError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| PhantomError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PluginPaths) -> Result<(), PhantomError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PhantomError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PhantomError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Full path of the plugin log
    pub fn log_path(&self, paths: &PluginPaths) -> PathBuf {
        paths.log_file(&self.log_file_name)
    }

    /// Create a logger for these settings
    pub fn logger(&self, paths: &PluginPaths) -> PluginLogger {
        PluginLogger::new(self.log_path(paths), self.log_level)
    }
}
