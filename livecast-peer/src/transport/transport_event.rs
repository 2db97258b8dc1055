use livecast_core::{IceCandidate, PeerId};
use std::fmt;

/// Coarse connection state reported by a peer-connection resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkState::Connecting => "connecting",
            LinkState::Connected => "connected",
            LinkState::Disconnected => "disconnected",
            LinkState::Failed => "failed",
            LinkState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Events raised by peer-connection resources outside of any negotiation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// A locally gathered candidate that must be trickled to the remote.
    LocalCandidate(PeerId, IceCandidate),
    ConnectionState(PeerId, LinkState),
    /// A remote media track arrived; carries the media kind.
    Track(PeerId, String),
}
