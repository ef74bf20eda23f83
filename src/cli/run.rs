//! The `run` command
//!
//! Replays a cheat against a budget snapshot: the director is started on an
//! in-memory host, a city is opened with the snapshot's budget, the cheat is
//! typed and the city is closed again.

use std::path::PathBuf;

use clap::Args;

use crate::config::{PluginPaths, Settings};
use crate::display::{format_budget, format_dialog};
use crate::error::{PhantomError, PhantomResult};
use crate::host::InMemoryHost;
use crate::plugin::PhantomBudgetDirector;
use crate::storage::BudgetSnapshot;

/// Arguments for `run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Budget snapshot to load
    #[arg(short, long)]
    pub budget: PathBuf,

    /// Print the budget after the command ran
    #[arg(long)]
    pub show: bool,

    /// Write the resulting budget to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cheat text, e.g. `RemovePhantomBudgetItems Fire`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub cheat: Vec<String>,
}

/// Handle the `run` command
pub fn handle_run(paths: &PluginPaths, settings: &Settings, args: RunArgs) -> PhantomResult<()> {
    let simulator = BudgetSnapshot::load(&args.budget)?.into_simulator()?;

    paths.ensure_directories()?;
    let mut director = PhantomBudgetDirector::new(settings.logger(paths))?;
    let mut host = InMemoryHost::new(simulator);

    host.start(&mut director)?;
    host.open_city(&mut director);

    let cheat = args.cheat.join(" ");
    let delivered = host.issue_cheat(&mut director, &cheat);

    for dialog in host.dialogs.take() {
        println!("{}", format_dialog(&dialog));
    }

    if delivered {
        let snapshot = BudgetSnapshot::from_simulator(&host.simulator.borrow());

        if args.show {
            println!();
            print!("{}", format_budget(&snapshot));
        }
        if let Some(output) = &args.output {
            snapshot.save(output)?;
            println!("Wrote budget to {}", output.display());
        }
    }

    host.close_city(&mut director);

    if !delivered {
        return Err(PhantomError::cheat_not_found(cheat));
    }

    Ok(())
}
