use crate::negotiation::{NegotiationError, NegotiationStage, Operation};
use crate::session::PeerSession;
use crate::signaling::SignalingOutput;
use crate::transport::{PeerEvent, PeerResourceFactory};
use livecast_core::codec::{self, Decoded};
use livecast_core::{PeerId, Role, SignalingMessage};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Owns every [`PeerSession`] of the local participant, keyed by remote id.
///
/// Handlers take `&mut self` and run to completion, so the table has a
/// single writer and needs no locking.
pub struct PeerSessionManager {
    local_id: PeerId,
    role: Role,
    sessions: HashMap<PeerId, PeerSession>,
    factory: Arc<dyn PeerResourceFactory>,
    signaling: Arc<dyn SignalingOutput>,
    event_tx: mpsc::Sender<PeerEvent>,
}

impl PeerSessionManager {
    pub fn new(
        local_id: PeerId,
        role: Role,
        factory: Arc<dyn PeerResourceFactory>,
        signaling: Arc<dyn SignalingOutput>,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Self {
        Self {
            local_id,
            role,
            sessions: HashMap::new(),
            factory,
            signaling,
            event_tx,
        }
    }

    pub fn local_id(&self) -> &PeerId {
        &self.local_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn session(&self, remote_id: &PeerId) -> Option<&PeerSession> {
        self.sessions.get(remote_id)
    }

    pub fn contains(&self, remote_id: &PeerId) -> bool {
        self.sessions.contains_key(remote_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The host opens a session and offers; viewers wait for the host's offer.
    pub async fn on_peer_joined(&mut self, remote_id: PeerId) {
        if remote_id == self.local_id {
            debug!("Ignoring join notification about ourselves");
            return;
        }
        if !self.role.is_host() {
            debug!("Viewer ignores join of {}", remote_id);
            return;
        }

        info!("Peer {} joined, sending offer", remote_id);
        let signaling = self.signaling.clone();
        let result = match self.session_entry(&remote_id).await {
            Ok(session) => session.create_offer(signaling.as_ref()).await,
            Err(e) => Err(e),
        };
        report(&remote_id, Operation::CreateOffer, result);
    }

    /// Decodes a relayed payload and dispatches it if it is addressed to us.
    pub async fn on_message(&mut self, payload: &str) {
        match codec::decode(&self.local_id, payload) {
            Ok(Decoded::Addressed(msg)) => self.on_signal(msg).await,
            Ok(Decoded::NotForUs { addressee }) => {
                debug!("Ignoring signaling message addressed to {}", addressee);
            }
            Err(e) => warn!("Dropping signaling message: {}", e),
        }
    }

    pub async fn on_signal(&mut self, msg: SignalingMessage) {
        let remote_id = msg.remote_id().clone();
        if remote_id == self.local_id {
            debug!("Ignoring {} echoed from ourselves", msg.kind());
            return;
        }

        let signaling = self.signaling.clone();
        let session = match self.session_entry(&remote_id).await {
            Ok(session) => session,
            Err(e) => {
                error!("No session for {}, dropping {}: {}", remote_id, msg.kind(), e);
                return;
            }
        };

        let (operation, result) = match msg {
            SignalingMessage::Offer { description, .. } => (
                Operation::ReceiveOffer,
                session.receive_offer(description, signaling.as_ref()).await,
            ),
            SignalingMessage::Answer { description, .. } => (
                Operation::ReceiveAnswer,
                session.receive_answer(description).await,
            ),
            SignalingMessage::Candidate { candidate, .. } => (
                Operation::ReceiveCandidate,
                session.receive_candidate(candidate).await,
            ),
        };
        report(&remote_id, operation, result);
    }

    /// Handles what a peer-connection resource reported on its own.
    pub async fn on_peer_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::LocalCandidate(remote_id, candidate) => {
                let Some(session) = self.sessions.get(&remote_id) else {
                    debug!("Dropping local candidate for departed peer {}", remote_id);
                    return;
                };
                if session.stage() == NegotiationStage::Closed {
                    return;
                }
                self.signaling
                    .send_signal(SignalingMessage::Candidate {
                        remote_id,
                        candidate,
                    })
                    .await;
            }
            PeerEvent::ConnectionState(remote_id, state) => {
                info!("Peer connection with {} is {}", remote_id, state);
            }
            PeerEvent::Track(remote_id, kind) => {
                info!("Receiving {} from {}", kind, remote_id);
            }
        }
    }

    pub async fn on_peer_left(&mut self, remote_id: &PeerId) {
        let Some(mut session) = self.sessions.remove(remote_id) else {
            debug!("Peer {} left without a session", remote_id);
            return;
        };
        session.close().await;
        info!("Peer {} left the room", remote_id);
    }

    pub async fn on_local_leave_room(&mut self) {
        for (_, mut session) in self.sessions.drain() {
            session.close().await;
        }
        info!("Left the room, all sessions closed");
    }

    async fn session_entry(&mut self, remote_id: &PeerId) -> Result<&mut PeerSession, NegotiationError> {
        match self.sessions.entry(remote_id.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let resource = self
                    .factory
                    .create(remote_id, self.event_tx.clone())
                    .await
                    .map_err(NegotiationError::resource)?;
                debug!("Created session for {}", remote_id);
                Ok(entry.insert(PeerSession::new(remote_id.clone(), resource)))
            }
        }
    }
}

fn report(remote_id: &PeerId, operation: Operation, result: Result<(), NegotiationError>) {
    match result {
        Ok(()) => debug!("{} with {} done", operation, remote_id),
        Err(e @ NegotiationError::StageConflict { .. }) => {
            warn!("Signaling conflict with {}: {}", remote_id, e);
        }
        Err(e @ NegotiationError::Closed { .. }) => {
            warn!("Session with {} already closed: {}", remote_id, e);
        }
        Err(e) => error!("{} with {} failed: {}", operation, remote_id, e),
    }
}
