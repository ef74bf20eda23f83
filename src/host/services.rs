//! Host service interfaces
//!
//! These mirror the services a host application exposes to its plugins:
//! message subscription, cheat code registration and the notification
//! dialog.

use crate::models::{CheatId, DirectorId, MessageId};

/// Delivers host messages to subscribed directors
pub trait MessageServer {
    /// Subscribe `director` to `message`; false if the host refuses
    fn add_notification(&mut self, director: DirectorId, message: MessageId) -> bool;

    /// Drop a subscription
    fn remove_notification(&mut self, director: DirectorId, message: MessageId) -> bool;
}

/// Registry of cheat strings typed into the host's cheat box
pub trait CheatCodeManager {
    /// Start delivering issued cheats to `director`
    fn add_notification(&mut self, director: DirectorId) -> bool;

    /// Stop delivering issued cheats to `director`
    fn remove_notification(&mut self, director: DirectorId) -> bool;

    /// Register a cheat string under `id`
    fn register_cheat_code(&mut self, id: CheatId, text: &str) -> bool;

    /// Remove a registered cheat
    fn unregister_cheat_code(&mut self, id: CheatId) -> bool;
}

/// Shows the host's modal notification dialog
pub trait NotificationSink {
    fn show_dialog(&mut self, message: &str, caption: &str);
}

/// Services passed to the director with every message
pub struct HostServices<'a> {
    /// The cheat code manager, when the application has one
    pub cheat_codes: Option<&'a mut dyn CheatCodeManager>,

    /// Where outcome messages are shown
    pub dialogs: &'a mut dyn NotificationSink,
}

impl<'a> HostServices<'a> {
    /// Create services with a cheat code manager
    pub fn new(cheat_codes: &'a mut dyn CheatCodeManager, dialogs: &'a mut dyn NotificationSink) -> Self {
        Self {
            cheat_codes: Some(cheat_codes),
            dialogs,
        }
    }

    /// Create services for an application without a cheat code manager
    pub fn without_cheat_codes(dialogs: &'a mut dyn NotificationSink) -> Self {
        Self {
            cheat_codes: None,
            dialogs,
        }
    }
}
