use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use phantom_budget::cli::{
    handle_categories, handle_config, handle_init, handle_run, handle_show, RunArgs,
};
use phantom_budget::config::{PluginPaths, Settings};

#[derive(Parser)]
#[command(
    name = "phantom-budget",
    author = "Nicholas Hayes",
    version,
    about = "Removes phantom locally funded items from city budget departments",
    long_about = "phantom-budget runs the RemovePhantomBudgetItems cheat against a \
                  budget snapshot. Buildings whose plugin files were removed leave \
                  entries behind in the budget window; the cheat finds and deletes them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cheat against a budget snapshot
    Run(RunArgs),

    /// Print a budget snapshot
    Show {
        /// Budget snapshot to load
        #[arg(short, long)]
        budget: PathBuf,
    },

    /// List the budget categories and the departments they cover
    Categories,

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PluginPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Run(args)) => {
            handle_run(&paths, &settings, args)?;
        }
        Some(Commands::Show { budget }) => {
            handle_show(&budget)?;
        }
        Some(Commands::Categories) => handle_categories(),
        Some(Commands::Init) => {
            handle_init(&paths, &settings)?;
        }
        Some(Commands::Config) => {
            handle_config(&paths, &settings)?;
        }
        None => {
            println!("phantom-budget - remove phantom budget items");
            println!();
            println!("Run 'phantom-budget --help' for usage information.");
        }
    }

    Ok(())
}
