//! Host messages the director handles

use std::fmt;

use crate::host::SimulatorHandle;
use crate::models::{CheatId, MessageId};

/// Sent after a city has finished loading
pub const POST_CITY_INIT: MessageId = MessageId::new(0x26D3_1EC1);

/// Sent while a city is being torn down
pub const POST_CITY_SHUTDOWN: MessageId = MessageId::new(0x26D3_1EC3);

/// Sent by the cheat code manager when a registered cheat is typed
pub const CHEAT_ISSUED: MessageId = MessageId::new(0x230E_27AC);

/// Messages the director subscribes to at startup
pub const REQUIRED_NOTIFICATIONS: [MessageId; 2] = [POST_CITY_INIT, POST_CITY_SHUTDOWN];

/// A message delivered by the host
pub enum HostMessage {
    /// A city was loaded; carries its budget simulator if it has one
    PostCityInit { simulator: Option<SimulatorHandle> },

    /// The current city is shutting down
    PostCityShutdown,

    /// A registered cheat was typed; `text` is the full cheat box contents
    CheatIssued { cheat_id: CheatId, text: String },

    /// Anything else
    Other(MessageId),
}

impl HostMessage {
    /// The message type id
    pub fn id(&self) -> MessageId {
        match self {
            Self::PostCityInit { .. } => POST_CITY_INIT,
            Self::PostCityShutdown => POST_CITY_SHUTDOWN,
            Self::CheatIssued { .. } => CHEAT_ISSUED,
            Self::Other(id) => *id,
        }
    }
}

impl fmt::Debug for HostMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostCityInit { simulator } => f
                .debug_struct("PostCityInit")
                .field("has_simulator", &simulator.is_some())
                .finish(),
            Self::PostCityShutdown => write!(f, "PostCityShutdown"),
            Self::CheatIssued { cheat_id, text } => f
                .debug_struct("CheatIssued")
                .field("cheat_id", cheat_id)
                .field("text", text)
                .finish(),
            Self::Other(id) => write!(f, "Other({})", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids() {
        assert_eq!(HostMessage::PostCityShutdown.id(), POST_CITY_SHUTDOWN);
        assert_eq!(HostMessage::PostCityInit { simulator: None }.id(), POST_CITY_INIT);
        let cheat = HostMessage::CheatIssued {
            cheat_id: CheatId::new(1),
            text: String::new(),
        };
        assert_eq!(cheat.id(), CHEAT_ISSUED);
        assert_eq!(HostMessage::Other(MessageId::new(5)).id(), MessageId::new(5));
    }

    #[test]
    fn test_debug_hides_simulator() {
        let message = HostMessage::PostCityInit { simulator: None };
        assert_eq!(format!("{:?}", message), "PostCityInit { has_simulator: false }");
    }
}
