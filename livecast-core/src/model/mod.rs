mod hub;
mod peer;
mod room;
mod signaling;

pub use hub::{HOST_JOINED_TEXT, HOST_STARTED_TEXT, HubEvent, HubRequest, VIEWER_WAITING_TEXT};
pub use peer::{PeerId, Role};
pub use room::RoomId;
pub use signaling::{
    IceCandidate, IceServerConfig, SdpKind, SessionDescription, SignalKind, SignalingMessage,
};
