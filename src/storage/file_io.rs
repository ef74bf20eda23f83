//! Snapshot file reads and atomic writes
//!
//! Every error names the file's role so a failed `run` tells the user
//! whether the budget it was given or the output it asked for is at fault.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::error::Category;

use crate::error::PhantomError;

/// Which snapshot a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRole {
    /// The budget a command runs against
    Budget,
    /// The budget written after a command ran
    Output,
}

impl fmt::Display for SnapshotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotRole::Budget => write!(f, "budget snapshot"),
            SnapshotRole::Output => write!(f, "output snapshot"),
        }
    }
}

/// Read a snapshot file that must exist
pub fn read_snapshot<T, P>(path: P, role: SnapshotRole) -> Result<T, PhantomError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(PhantomError::Snapshot(format!(
            "File not found: {} {}",
            role,
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| {
        PhantomError::Snapshot(format!("Failed to open {} {}: {}", role, path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        let problem = match e.classify() {
            // Well-formed JSON with the wrong fields or id formats
            Category::Data => "does not describe a budget",
            Category::Syntax | Category::Eof => "is not valid JSON",
            Category::Io => "could not be read",
        };
        PhantomError::Snapshot(format!("{} {} {}: {}", role, path.display(), problem, e))
    })
}

/// Write a snapshot file atomically
///
/// The data goes to `<name>.tmp` beside the target first and is renamed
/// over it once synced, so a reader never sees a half-written budget.
pub fn write_snapshot<T, P>(path: P, data: &T, role: SnapshotRole) -> Result<(), PhantomError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PhantomError::Snapshot(format!(
                "Failed to create directory {} for {}: {}",
                parent.display(),
                role,
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let fail = |step: &str, e: String| {
        PhantomError::Snapshot(format!(
            "Failed to {} {} {}: {}",
            step,
            role,
            path.display(),
            e
        ))
    };

    let file = File::create(&temp_path).map_err(|e| fail("create", e.to_string()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| fail("serialize", e.to_string()))?;
    writer.flush().map_err(|e| fail("flush", e.to_string()))?;
    writer.get_ref().sync_all().map_err(|e| fail("sync", e.to_string()))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        fail("replace", e.to_string())
    })?;

    Ok(())
}

/// `after.json` -> `after.json.tmp`; keeps any extension the user chose
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_missing_file_names_the_role() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("city.json");

        let err = read_snapshot::<TestData, _>(&path, SnapshotRole::Budget).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("File not found: budget snapshot"));
        assert!(message.contains("city.json"));
    }

    #[test]
    fn test_invalid_json_and_wrong_shape_are_told_apart() {
        let temp_dir = TempDir::new().unwrap();
        let garbage = temp_dir.path().join("garbage.json");
        let wrong = temp_dir.path().join("wrong.json");
        fs::write(&garbage, "not json at all").unwrap();
        fs::write(&wrong, r#"{"name": 5, "value": "x"}"#).unwrap();

        let err = read_snapshot::<TestData, _>(&garbage, SnapshotRole::Budget).unwrap_err();
        assert!(matches!(err, PhantomError::Snapshot(_)));
        assert!(err.to_string().contains("is not valid JSON"));

        let err = read_snapshot::<TestData, _>(&wrong, SnapshotRole::Budget).unwrap_err();
        assert!(err.to_string().contains("does not describe a budget"));
    }

    #[test]
    fn test_atomic_write_keeps_extension_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("after.budget");
        let temp_path = temp_dir.path().join("nested").join("after.budget.tmp");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_snapshot(&path, &data, SnapshotRole::Output).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
        let loaded: TestData = read_snapshot(&path, SnapshotRole::Output).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_write_failure_names_output_role() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the output file should go
        let path = temp_dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("child"), "x").unwrap();

        let err = write_snapshot(&path, &TestData::default(), SnapshotRole::Output).unwrap_err();
        assert!(err.to_string().contains("output snapshot"));
        assert!(path.is_dir());
    }
}
