//! Display formatting for terminal output

pub mod budget;

pub use budget::{format_budget, format_category_table, format_dialog};
