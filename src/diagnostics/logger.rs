//! Append-only plugin log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{PhantomError, PhantomResult};

use super::entry::{LogEntry, LogLevel};

/// Writes diagnostic entries to the plugin log file
///
/// Entries below `min_level` are dropped. The header written at startup is
/// always kept.
#[derive(Debug, Clone)]
pub struct PluginLogger {
    /// Path to the log file
    log_path: PathBuf,

    /// Least severe level that is written
    min_level: LogLevel,
}

impl PluginLogger {
    /// Create a logger that writes to the specified path
    pub fn new(log_path: PathBuf, min_level: LogLevel) -> Self {
        Self {
            log_path,
            min_level,
        }
    }

    /// Write the startup header line
    pub fn write_header(&self, title: &str) -> PhantomResult<()> {
        self.append(&LogEntry::new(LogLevel::Info, title))
    }

    /// Log a message
    ///
    /// Returns whether the entry passed the level filter and was written.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> PhantomResult<bool> {
        if level < self.min_level {
            return Ok(false);
        }
        self.append(&LogEntry::new(level, message))?;
        Ok(true)
    }

    fn append(&self, entry: &LogEntry) -> PhantomResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PhantomError::Io(format!("Failed to open plugin log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| PhantomError::Json(format!("Failed to serialize log entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| PhantomError::Io(format!("Failed to write log entry: {}", e)))?;

        file.flush()
            .map_err(|e| PhantomError::Io(format!("Failed to flush plugin log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> PhantomResult<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| PhantomError::Io(format!("Failed to open plugin log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                PhantomError::Io(format!("Failed to read plugin log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                PhantomError::Json(format!(
                    "Failed to parse log entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Get the number of entries in the log
    pub fn entry_count(&self) -> PhantomResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    /// The least severe level that is written
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
