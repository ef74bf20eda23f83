//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the plugin and its host.

pub mod budget;
pub mod config;
pub mod run;

pub use budget::{handle_categories, handle_show};
pub use config::{format_config, handle_config, handle_init};
pub use run::{handle_run, RunArgs};
