//! Storage layer for phantom-budget
//!
//! Budget snapshots are plain JSON files written atomically. Read and write
//! errors say which snapshot (the input budget or the output) failed.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_snapshot, write_snapshot, SnapshotRole};
pub use snapshot::{BudgetSnapshot, DepartmentSnapshot, PurposeSnapshot};
