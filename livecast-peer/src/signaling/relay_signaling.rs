use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use livecast_core::codec;
use livecast_core::{HubRequest, PeerId, RoomId, SignalingMessage};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Sends signaling messages as `SendMessage` calls on the relay, which fans
/// them out to the whole room.
#[derive(Clone)]
pub struct RelaySignaling {
    local_id: PeerId,
    room_id: RoomId,
    hub_tx: mpsc::UnboundedSender<HubRequest>,
}

impl RelaySignaling {
    pub fn new(local_id: PeerId, room_id: RoomId, hub_tx: mpsc::UnboundedSender<HubRequest>) -> Self {
        Self {
            local_id,
            room_id,
            hub_tx,
        }
    }
}

#[async_trait]
impl SignalingOutput for RelaySignaling {
    async fn send_signal(&self, msg: SignalingMessage) {
        let message = match codec::encode(&self.local_id, &msg) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to encode {} for {}: {}", msg.kind(), msg.remote_id(), e);
                return;
            }
        };

        debug!("Relaying {} to {}", msg.kind(), msg.remote_id());
        let request = HubRequest::SendMessage {
            room_id: self.room_id.to_string(),
            message,
        };
        if let Err(e) = self.hub_tx.send(request) {
            error!("Relay connection closed, dropping {}: {}", msg.kind(), e);
        }
    }
}
