use crate::room::RoomDirectory;
use dashmap::DashMap;
use livecast_core::{
    HOST_JOINED_TEXT, HOST_STARTED_TEXT, HubEvent, HubRequest, IceServerConfig, PeerId, RoomId,
    VIEWER_WAITING_TEXT, ValidationError,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<HubEvent>>,
    rooms: RoomDirectory,
    ice_servers: Vec<IceServerConfig>,
}

/// Room membership and fan-out for every connected participant.
///
/// The relay never looks inside signaling payloads: a `SendMessage` is
/// broadcast verbatim to the whole room, sender included, and recipients
/// filter by addressee.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                rooms: RoomDirectory::new(),
                ice_servers,
            }),
        }
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    /// Registers a new connection under a fresh id and greets it.
    pub fn connect(&self, tx: mpsc::UnboundedSender<HubEvent>) -> PeerId {
        let peer_id = PeerId::new();
        self.add_peer(peer_id.clone(), tx);
        self.send_to(
            &peer_id,
            HubEvent::Welcome {
                connection_id: peer_id.clone(),
                ice_servers: self.ice_servers(),
            },
        );
        peer_id
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<HubEvent>) {
        self.inner.peers.insert(peer_id, tx);
    }

    /// Drops the connection and tells every room it was in.
    pub fn disconnect(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
        for room_id in self.inner.rooms.leave_all(peer_id) {
            info!("{} dropped out of room '{}'", peer_id, room_id);
            self.broadcast(
                &room_id,
                HubEvent::UserLeft {
                    connection_id: peer_id.clone(),
                },
            );
        }
    }

    pub fn handle_request(&self, caller: &PeerId, request: HubRequest) {
        let result = match request {
            HubRequest::JoinRoom { room_id, is_host } => self.join_room(caller, &room_id, is_host),
            HubRequest::StartStreaming { room_id } => self.start_streaming(caller, &room_id),
            HubRequest::LeaveRoom { room_id } => self.leave_room(caller, &room_id),
            HubRequest::SendMessage { room_id, message } => self.relay(caller, &room_id, message),
        };

        if let Err(e) = result {
            warn!("Rejected request from {}: {}", caller, e);
            self.send_to(
                caller,
                HubEvent::Error {
                    message: e.to_string(),
                },
            );
        }
    }

    pub fn join_room(
        &self,
        caller: &PeerId,
        room_id: &str,
        is_host: bool,
    ) -> Result<(), ValidationError> {
        let room_id = RoomId::parse(room_id)?;
        if !self.inner.rooms.join(&room_id, caller) {
            debug!("{} joined room '{}' again", caller, room_id);
        }

        if is_host {
            info!("Host {} joined room '{}'", caller, room_id);
            self.broadcast(
                &room_id,
                HubEvent::HostJoined {
                    message: HOST_JOINED_TEXT.to_string(),
                },
            );
        } else {
            info!("Viewer {} joined room '{}'", caller, room_id);
            self.send_to(
                caller,
                HubEvent::ConnectionStatus {
                    message: VIEWER_WAITING_TEXT.to_string(),
                },
            );
        }

        self.broadcast(
            &room_id,
            HubEvent::UserJoined {
                connection_id: caller.clone(),
            },
        );
        Ok(())
    }

    pub fn start_streaming(&self, caller: &PeerId, room_id: &str) -> Result<(), ValidationError> {
        let room_id = RoomId::parse(room_id)?;
        info!("{} started streaming in room '{}'", caller, room_id);
        self.broadcast(
            &room_id,
            HubEvent::HostStartedStreaming {
                message: HOST_STARTED_TEXT.to_string(),
            },
        );
        Ok(())
    }

    /// Leaving a room one is not in still notifies whoever is there.
    pub fn leave_room(&self, caller: &PeerId, room_id: &str) -> Result<(), ValidationError> {
        let room_id = RoomId::parse(room_id)?;
        if !self.inner.rooms.leave(&room_id, caller) {
            debug!("{} left room '{}' without being a member", caller, room_id);
        }
        info!("{} left room '{}'", caller, room_id);
        self.broadcast(
            &room_id,
            HubEvent::UserLeft {
                connection_id: caller.clone(),
            },
        );
        Ok(())
    }

    pub fn relay(
        &self,
        caller: &PeerId,
        room_id: &str,
        message: String,
    ) -> Result<(), ValidationError> {
        let room_id = RoomId::parse(room_id)?;
        debug!("Relaying {} bytes from {} to room '{}'", message.len(), caller, room_id);
        self.broadcast(&room_id, HubEvent::ReceiveMessage { message });
        Ok(())
    }

    pub fn room_members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.inner.rooms.members(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.inner.rooms.room_count()
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    fn send_to(&self, peer_id: &PeerId, event: HubEvent) {
        let Some(tx) = self.inner.peers.get(peer_id).map(|tx| tx.clone()) else {
            warn!("Attempted to send to disconnected peer {}", peer_id);
            return;
        };
        if tx.send(event).is_err() {
            warn!("Outbound channel of {} is closed", peer_id);
        }
    }

    fn broadcast(&self, room_id: &RoomId, event: HubEvent) {
        // Collect first so no map guard is held while sending.
        let targets: Vec<_> = self
            .inner
            .rooms
            .members(room_id)
            .into_iter()
            .filter_map(|id| self.inner.peers.get(&id).map(|tx| (id, tx.clone())))
            .collect();

        for (peer_id, tx) in targets {
            if tx.send(event.clone()).is_err() {
                warn!("Outbound channel of {} is closed", peer_id);
            }
        }
    }
}
