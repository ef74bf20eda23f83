//! phantom-budget - removes phantom budget items from a city
//!
//! When a building's plugin file is uninstalled, the budget simulator keeps
//! its locally funded entries and line items. This crate implements the
//! `RemovePhantomBudgetItems <category> [all]` cheat that finds those
//! entries (they no longer carry the exemplar type property) and removes
//! them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: ids, budget categories, locally funded items and the
//!   arena-backed list the host fills
//! - `host`: traits for the host's budget simulator and services, plus an
//!   in-memory host
//! - `services`: command parsing, category resolution, orphan scanning and
//!   removal
//! - `plugin`: the director that receives host messages
//! - `diagnostics`: the plugin log
//! - `config`: paths and settings
//! - `storage`: budget snapshot files
//! - `display` / `cli`: the command-line host emulator
//!
//! # Example
//!
//! ```rust,ignore
//! use phantom_budget::config::{PluginPaths, Settings};
//! use phantom_budget::host::InMemoryHost;
//! use phantom_budget::plugin::PhantomBudgetDirector;
//!
//! let paths = PluginPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut director = PhantomBudgetDirector::new(settings.logger(&paths))?;
//! let mut host = InMemoryHost::new(simulator);
//! host.start(&mut director)?;
//! host.open_city(&mut director);
//! host.issue_cheat(&mut director, "RemovePhantomBudgetItems Fire");
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod host;
pub mod models;
pub mod plugin;
pub mod services;
pub mod storage;

pub use error::{PhantomError, PhantomResult};
