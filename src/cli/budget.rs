//! Budget inspection commands

use std::path::Path;

use crate::display::{format_budget, format_category_table};
use crate::error::PhantomResult;
use crate::storage::BudgetSnapshot;

/// Handle the `show` command
pub fn handle_show(budget: &Path) -> PhantomResult<()> {
    let snapshot = BudgetSnapshot::load(budget)?;

    // Catch snapshots the plugin host would refuse
    snapshot.clone().into_simulator()?;

    print!("{}", format_budget(&snapshot));
    Ok(())
}

/// Handle the `categories` command
pub fn handle_categories() {
    println!("{}", format_category_table());
}
