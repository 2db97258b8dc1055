use livecast_core::{HubEvent, PeerId};
use tracing::{info, warn};

/// Transport notifications that drive a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantEvent {
    PeerJoined(PeerId),
    PeerLeft(PeerId),
    /// A relayed signaling payload, not yet decoded.
    Message(String),
    /// The local participant leaves the room.
    LeaveRoom,
}

impl ParticipantEvent {
    /// Maps a relay notification onto the events the session manager cares
    /// about. Status notifications are only logged.
    pub fn from_hub(event: HubEvent) -> Option<Self> {
        match event {
            HubEvent::UserJoined { connection_id } => Some(Self::PeerJoined(connection_id)),
            HubEvent::UserLeft { connection_id } => Some(Self::PeerLeft(connection_id)),
            HubEvent::ReceiveMessage { message } => Some(Self::Message(message)),
            HubEvent::HostJoined { message }
            | HubEvent::HostStartedStreaming { message }
            | HubEvent::ConnectionStatus { message } => {
                info!("Relay: {}", message);
                None
            }
            HubEvent::Error { message } => {
                warn!("Relay rejected a request: {}", message);
                None
            }
            HubEvent::Welcome { connection_id, .. } => {
                info!("Relay assigned connection id {}", connection_id);
                None
            }
        }
    }
}
