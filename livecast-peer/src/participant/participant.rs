use crate::participant::ParticipantEvent;
use crate::session::PeerSessionManager;
use crate::signaling::SignalingOutput;
use crate::transport::{PeerEvent, PeerResourceFactory};
use livecast_core::{PeerId, Role};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Event loop of one participant in a room.
///
/// Transport events and resource events are handled one at a time, each to
/// completion, by the same task.
pub struct Participant {
    manager: PeerSessionManager,
    event_rx: mpsc::Receiver<ParticipantEvent>,
    peer_rx: mpsc::Receiver<PeerEvent>,
}

impl Participant {
    pub fn new(
        local_id: PeerId,
        role: Role,
        factory: Arc<dyn PeerResourceFactory>,
        signaling: Arc<dyn SignalingOutput>,
        event_rx: mpsc::Receiver<ParticipantEvent>,
    ) -> Self {
        let (peer_tx, peer_rx) = mpsc::channel(256);

        Self {
            manager: PeerSessionManager::new(local_id, role, factory, signaling, peer_tx),
            event_rx,
            peer_rx,
        }
    }

    pub fn manager(&self) -> &PeerSessionManager {
        &self.manager
    }

    /// Runs until the participant leaves or the transport goes away. Returns
    /// the manager so callers can inspect what is left.
    pub async fn run(mut self) -> PeerSessionManager {
        info!(
            "Participant {} started as {}",
            self.manager.local_id(),
            self.manager.role()
        );

        loop {
            tokio::select! {
                evt = self.event_rx.recv() => {
                    match evt {
                        Some(e) => {
                            if self.handle_event(e).await.is_break() {
                                break;
                            }
                        }
                        None => {
                            warn!("Transport channel closed. Leaving room.");
                            self.manager.on_local_leave_room().await;
                            break;
                        }
                    }
                }

                Some(evt) = self.peer_rx.recv() => {
                    self.manager.on_peer_event(evt).await;
                }
            }
        }

        info!("Participant {} stopped", self.manager.local_id());
        self.manager
    }

    /// Breaks once the local participant has left the room.
    async fn handle_event(&mut self, event: ParticipantEvent) -> ControlFlow<()> {
        match event {
            ParticipantEvent::PeerJoined(remote_id) => self.manager.on_peer_joined(remote_id).await,
            ParticipantEvent::PeerLeft(remote_id) => self.manager.on_peer_left(&remote_id).await,
            ParticipantEvent::Message(payload) => self.manager.on_message(&payload).await,
            ParticipantEvent::LeaveRoom => {
                self.manager.on_local_leave_room().await;
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}
