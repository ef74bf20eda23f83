//! Path management for phantom-budget
//!
//! ## Path Resolution Order
//!
//! 1. `PHANTOM_BUDGET_DIR` environment variable (if set)
//! 2. The platform config directory for `phantom-budget`
//!    (`~/.config/phantom-budget` on Linux, `%APPDATA%\phantom-budget\config`
//!    on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PhantomError;

/// Environment variable that overrides the base directory
pub const BASE_DIR_ENV: &str = "PHANTOM_BUDGET_DIR";

/// Manages the paths used by the plugin
#[derive(Debug, Clone)]
pub struct PluginPaths {
    /// Directory holding the settings file and the plugin log
    base_dir: PathBuf,
}

impl PluginPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PhantomError> {
        let base_dir = if let Ok(custom) = std::env::var(BASE_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "phantom-budget")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| PhantomError::Config("Could not determine the config directory".into()))?
        };

        Ok(Self { base_dir })
    }

    /// Create PluginPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to a log file in the base directory
    pub fn log_file(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Create the base directory if it is missing
    pub fn ensure_directories(&self) -> Result<(), PhantomError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PhantomError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
