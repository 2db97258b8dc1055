use crate::model::peer::PeerId;
use crate::model::signaling::IceServerConfig;
use serde::{Deserialize, Serialize};

/// Calls a participant makes on the relay.
///
/// Room names arrive as plain strings; the relay validates them so that a
/// blank name can be reported back to the caller instead of failing decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum HubRequest {
    JoinRoom { room_id: String, is_host: bool },
    StartStreaming { room_id: String },
    LeaveRoom { room_id: String },
    SendMessage { room_id: String, message: String },
}

/// Notifications the relay pushes to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum HubEvent {
    Welcome {
        connection_id: PeerId,
        ice_servers: Vec<IceServerConfig>,
    },
    HostJoined {
        message: String,
    },
    ConnectionStatus {
        message: String,
    },
    HostStartedStreaming {
        message: String,
    },
    UserJoined {
        connection_id: PeerId,
    },
    UserLeft {
        connection_id: PeerId,
    },
    ReceiveMessage {
        message: String,
    },
    Error {
        message: String,
    },
}

pub const HOST_JOINED_TEXT: &str = "Host has joined and started streaming";
pub const VIEWER_WAITING_TEXT: &str = "Joined livestream - waiting for host stream";
pub const HOST_STARTED_TEXT: &str = "Host has started streaming";
