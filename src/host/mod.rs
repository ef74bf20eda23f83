//! Host collaborator interfaces
//!
//! The plugin never owns the budget simulator or any host service. Everything
//! it touches is reached through the traits in this module, handed to it
//! explicitly by whoever drives the director.
//!
//! - `budget`: department budgets and the budget simulator
//! - `services`: message server, cheat code manager and dialog sink
//! - `memory`: in-memory implementations used by the CLI and tests

pub mod budget;
pub mod memory;
pub mod services;

pub use budget::{BudgetSimulator, DepartmentBudget, SimulatorHandle};
pub use memory::{
    Dialog, InMemoryBudgetSimulator, InMemoryDepartment, InMemoryHost, RecordingCheatCodeManager,
    RecordingDialogs, RecordingMessageServer,
};
pub use services::{CheatCodeManager, HostServices, MessageServer, NotificationSink};
