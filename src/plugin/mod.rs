//! The plugin's entry point into the host
//!
//! `PhantomBudgetDirector` receives host messages and wires the command
//! parser and removal service to the active city.

mod director;
mod messages;

pub use director::{PhantomBudgetDirector, CHEAT_ID, DIRECTOR_ID, PLUGIN_NAME, PLUGIN_VERSION};
pub use messages::{
    HostMessage, CHEAT_ISSUED, POST_CITY_INIT, POST_CITY_SHUTDOWN, REQUIRED_NOTIFICATIONS,
};
