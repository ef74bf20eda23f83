//! Diagnostic logging for phantom-budget
//!
//! The plugin keeps a line-delimited JSON log next to its configuration.
//! A header line is written every time the director is created; other
//! entries are filtered by the configured level, which defaults to errors
//! only.
//!
//! - `LogEntry`: timestamp, level and message
//! - `PluginLogger`: appends entries to the log file and reads them back

mod entry;
mod logger;

pub use entry::{LogEntry, LogLevel};
pub use logger::PluginLogger;
