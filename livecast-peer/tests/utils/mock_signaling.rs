use async_trait::async_trait;
use livecast_core::codec;
use livecast_core::{IceCandidate, PeerId, SessionDescription, SignalingMessage};
use livecast_peer::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// SignalingOutput that records every outbound signal.
#[derive(Clone)]
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<SignalingMessage>,
    signals: Arc<Mutex<Vec<SignalingMessage>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalingMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            signals: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    pub fn new_stored_only() -> Self {
        Self::new().0
    }

    pub async fn signals(&self) -> Vec<SignalingMessage> {
        self.signals.lock().await.clone()
    }

    pub async fn offers_for(&self, peer_id: &PeerId) -> Vec<SessionDescription> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                SignalingMessage::Offer {
                    remote_id,
                    description,
                } if remote_id == peer_id => Some(description.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn answers_for(&self, peer_id: &PeerId) -> Vec<SessionDescription> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                SignalingMessage::Answer {
                    remote_id,
                    description,
                } if remote_id == peer_id => Some(description.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn candidates_for(&self, peer_id: &PeerId) -> Vec<IceCandidate> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                SignalingMessage::Candidate {
                    remote_id,
                    candidate,
                } if remote_id == peer_id => Some(candidate.clone()),
                _ => None,
            })
            .collect()
    }

    /// Wire payloads as another participant would receive them from the relay.
    pub async fn relayed_from(&self, sender: &PeerId) -> Vec<String> {
        self.signals
            .lock()
            .await
            .iter()
            .map(|s| codec::encode(sender, s).expect("encode"))
            .collect()
    }

    pub async fn clear(&self) {
        self.signals.lock().await.clear();
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_signal(&self, msg: SignalingMessage) {
        tracing::debug!("[MockSignaling] {} to {}", msg.kind(), msg.remote_id());

        self.signals.lock().await.push(msg.clone());
        let _ = self.tx.send(msg);
    }
}
