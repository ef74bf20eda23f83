//! The plugin director
//!
//! Subscribes to the city lifecycle at startup, registers the
//! `RemovePhantomBudgetItems` cheat while a city is loaded and runs the
//! removal service when the cheat is typed.

use crate::diagnostics::{LogLevel, PluginLogger};
use crate::error::{PhantomError, PhantomResult};
use crate::host::{HostServices, MessageServer, NotificationSink, SimulatorHandle};
use crate::models::{CheatId, DirectorId};
use crate::services::{PhantomCommand, RemovalService, CHEAT_STRING};

use super::messages::{HostMessage, REQUIRED_NOTIFICATIONS};

/// Class id the director registers under
pub const DIRECTOR_ID: DirectorId = DirectorId::new(0x6A70_2330);

/// Id of the `RemovePhantomBudgetItems` cheat
pub const CHEAT_ID: CheatId = CheatId::new(0x7630_FE7F);

/// Name used in the log header
pub const PLUGIN_NAME: &str = "SC4RemovePhantomBudgetItems";

/// Plugin version written to the log header
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message shown in the log when startup subscriptions fail
const SUBSCRIBE_FAILED: &str = "Failed to subscribe to the required notifications.";

/// The plugin's message handler
pub struct PhantomBudgetDirector {
    logger: PluginLogger,
    simulator: Option<SimulatorHandle>,
    started: bool,
}

impl PhantomBudgetDirector {
    /// Create the director and write the log header
    pub fn new(logger: PluginLogger) -> PhantomResult<Self> {
        logger.write_header(&format!("{} v{}", PLUGIN_NAME, PLUGIN_VERSION))?;

        Ok(Self {
            logger,
            simulator: None,
            started: false,
        })
    }

    pub fn director_id(&self) -> DirectorId {
        DIRECTOR_ID
    }

    /// Whether startup succeeded
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a city's budget simulator is currently held
    pub fn has_city(&self) -> bool {
        self.simulator.is_some()
    }

    pub fn logger(&self) -> &PluginLogger {
        &self.logger
    }

    /// Subscribe to the city lifecycle messages
    ///
    /// On failure the director stays inert: every later message is ignored.
    pub fn post_app_init(&mut self, message_server: Option<&mut dyn MessageServer>) -> PhantomResult<()> {
        let Some(server) = message_server else {
            self.record(LogLevel::Error, SUBSCRIBE_FAILED);
            return Err(PhantomError::HostServiceUnavailable(
                "message server is not available".into(),
            ));
        };

        for message in REQUIRED_NOTIFICATIONS {
            if !server.add_notification(DIRECTOR_ID, message) {
                self.record(LogLevel::Error, SUBSCRIBE_FAILED);
                return Err(PhantomError::HostServiceUnavailable(format!(
                    "subscription to message {} was refused",
                    message
                )));
            }
        }

        self.started = true;
        Ok(())
    }

    /// Handle a host message
    ///
    /// Returns false when the director is inert or the message is not one
    /// it handles.
    pub fn do_message(&mut self, message: HostMessage, services: HostServices<'_>) -> bool {
        if !self.started {
            return false;
        }

        match message {
            HostMessage::PostCityInit { simulator } => {
                self.city_init(simulator, services);
                true
            }
            HostMessage::PostCityShutdown => {
                self.city_shutdown(services);
                true
            }
            HostMessage::CheatIssued { cheat_id, text } => {
                if cheat_id == CHEAT_ID {
                    self.process_cheat(&text, services.dialogs);
                }
                true
            }
            HostMessage::Other(_) => false,
        }
    }

    fn city_init(&mut self, simulator: Option<SimulatorHandle>, services: HostServices<'_>) {
        let Some(simulator) = simulator else {
            self.record(LogLevel::Debug, "City loaded without a budget simulator");
            return;
        };
        self.simulator = Some(simulator);

        if let Some(cheat_codes) = services.cheat_codes {
            cheat_codes.add_notification(DIRECTOR_ID);
            cheat_codes.register_cheat_code(CHEAT_ID, CHEAT_STRING);
        }
    }

    fn city_shutdown(&mut self, services: HostServices<'_>) {
        self.simulator = None;

        if let Some(cheat_codes) = services.cheat_codes {
            cheat_codes.remove_notification(DIRECTOR_ID);
            cheat_codes.unregister_cheat_code(CHEAT_ID);
        }
    }

    fn process_cheat(&mut self, text: &str, dialogs: &mut dyn NotificationSink) {
        let command = match PhantomCommand::parse(text) {
            Ok(command) => command,
            Err(err) => {
                dialogs.show_dialog(&err.to_string(), CHEAT_STRING);
                return;
            }
        };

        let Some(handle) = self.simulator.clone() else {
            self.record(
                LogLevel::Warning,
                format!("Ignored '{}': no city is loaded", text.trim()),
            );
            return;
        };

        let report = match handle.try_borrow_mut() {
            Ok(mut simulator) => RemovalService::new(&mut *simulator).remove_phantom_items(&command),
            Err(_) => {
                self.record(
                    LogLevel::Warning,
                    "Ignored the command: the budget simulator is already in use",
                );
                return;
            }
        };

        for department in &report.missing_departments {
            self.record(
                LogLevel::Debug,
                format!("Department {} is not present in this city", department),
            );
        }
        for record in &report.records {
            let level = if record.unlinked {
                LogLevel::Info
            } else {
                LogLevel::Warning
            };
            self.record(level, record.to_string());
        }

        dialogs.show_dialog(&report.outcome.to_string(), CHEAT_STRING);
    }

    /// Log without failing the caller; the log is diagnostic only
    fn record(&self, level: LogLevel, message: impl Into<String>) {
        let _ = self.logger.log(level, message);
    }
}
