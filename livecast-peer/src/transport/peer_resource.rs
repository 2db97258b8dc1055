use crate::transport::PeerEvent;
use anyhow::Result;
use async_trait::async_trait;
use livecast_core::{IceCandidate, PeerId, SessionDescription};
use tokio::sync::mpsc;

/// The underlying connection object owned by one peer session.
#[async_trait]
pub trait PeerResource: Send + Sync {
    /// Create a local offer and apply it as the local description.
    async fn create_offer(&self) -> Result<SessionDescription>;

    /// Create a local answer and apply it as the local description.
    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_remote_description(&self, description: &SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds a [`PeerResource`] for each new session.
///
/// `events` receives everything the resource reports on its own (gathered
/// candidates, state changes, remote tracks).
#[async_trait]
pub trait PeerResourceFactory: Send + Sync {
    async fn create(
        &self,
        remote_id: &PeerId,
        events: mpsc::Sender<PeerEvent>,
    ) -> Result<Box<dyn PeerResource>>;
}
