//! Configuration module for phantom-budget
//!
//! This module provides:
//! - Base directory resolution
//! - Settings persistence (log level and log file name)

pub mod paths;
pub mod settings;

pub use paths::{PluginPaths, BASE_DIR_ENV};
pub use settings::{Settings, DEFAULT_LOG_FILE_NAME};
