//! Service layer for phantom-budget
//!
//! The service layer holds the plugin's logic on top of the host traits:
//! parsing the cheat command, resolving budget categories, finding orphaned
//! items and removing them.

pub mod command;
pub mod removal;
pub mod resolver;
pub mod scanner;

pub use command::{CommandError, PhantomCommand, CHEAT_STRING, USAGE};
pub use removal::{OrphanSet, RemovalOutcome, RemovalRecord, RemovalReport, RemovalService};
pub use resolver::{category_purposes, resolve};
pub use scanner::{collect_orphans, OrphanedItem};
