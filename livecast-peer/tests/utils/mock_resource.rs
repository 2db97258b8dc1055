use anyhow::{Result, bail};
use async_trait::async_trait;
use livecast_core::{IceCandidate, PeerId, SessionDescription};
use livecast_peer::{PeerEvent, PeerResource, PeerResourceFactory};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Everything a mock peer connection was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCall {
    CreateOffer(PeerId),
    CreateAnswer(PeerId),
    SetRemote(PeerId, SessionDescription),
    AddCandidate(PeerId, IceCandidate),
    Close(PeerId),
}

/// Local description step a mock resource can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalStep {
    CreateOffer,
    CreateAnswer,
}

type PendingFailures = Arc<Mutex<HashMap<PeerId, Vec<LocalStep>>>>;

pub fn offer_sdp(remote_id: &PeerId) -> String {
    format!("offer-for-{remote_id}")
}

pub fn answer_sdp(remote_id: &PeerId) -> String {
    format!("answer-for-{remote_id}")
}

/// Factory of scripted peer connections sharing one call log.
#[derive(Clone, Default)]
pub struct MockResourceFactory {
    calls: Arc<Mutex<Vec<ResourceCall>>>,
    created: Arc<Mutex<Vec<PeerId>>>,
    broken: Arc<Mutex<HashSet<PeerId>>>,
    failures: PendingFailures,
    events: Arc<Mutex<HashMap<PeerId, mpsc::Sender<PeerEvent>>>>,
}

impl MockResourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resources created for `peer_id` from now on reject every description
    /// and candidate.
    pub async fn break_peer(&self, peer_id: &PeerId) {
        self.broken.lock().await.insert(peer_id.clone());
    }

    /// The next `step` on the resource for `peer_id` fails, later ones succeed.
    pub async fn fail_once(&self, peer_id: &PeerId, step: LocalStep) {
        self.failures
            .lock()
            .await
            .entry(peer_id.clone())
            .or_default()
            .push(step);
    }

    pub async fn calls(&self) -> Vec<ResourceCall> {
        self.calls.lock().await.clone()
    }

    pub async fn calls_for(&self, peer_id: &PeerId) -> Vec<ResourceCall> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| match c {
                ResourceCall::CreateOffer(id)
                | ResourceCall::CreateAnswer(id)
                | ResourceCall::SetRemote(id, _)
                | ResourceCall::AddCandidate(id, _)
                | ResourceCall::Close(id) => id == peer_id,
            })
            .cloned()
            .collect()
    }

    pub async fn applied_candidates(&self, peer_id: &PeerId) -> Vec<IceCandidate> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                ResourceCall::AddCandidate(id, candidate) if id == peer_id => {
                    Some(candidate.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub async fn created(&self) -> Vec<PeerId> {
        self.created.lock().await.clone()
    }

    /// The event channel handed to the resource for `peer_id`.
    pub async fn event_sender(&self, peer_id: &PeerId) -> Option<mpsc::Sender<PeerEvent>> {
        self.events.lock().await.get(peer_id).cloned()
    }
}

#[async_trait]
impl PeerResourceFactory for MockResourceFactory {
    async fn create(
        &self,
        remote_id: &PeerId,
        events: mpsc::Sender<PeerEvent>,
    ) -> Result<Box<dyn PeerResource>> {
        self.created.lock().await.push(remote_id.clone());
        self.events.lock().await.insert(remote_id.clone(), events);

        Ok(Box::new(MockPeerResource {
            remote_id: remote_id.clone(),
            calls: self.calls.clone(),
            failures: self.failures.clone(),
            broken: self.broken.lock().await.contains(remote_id),
        }))
    }
}

pub struct MockPeerResource {
    remote_id: PeerId,
    calls: Arc<Mutex<Vec<ResourceCall>>>,
    failures: PendingFailures,
    broken: bool,
}

impl MockPeerResource {
    async fn record(&self, call: ResourceCall) {
        self.calls.lock().await.push(call);
    }

    async fn take_failure(&self, step: LocalStep) -> bool {
        let mut failures = self.failures.lock().await;
        let Some(steps) = failures.get_mut(&self.remote_id) else {
            return false;
        };
        match steps.iter().position(|s| *s == step) {
            Some(index) => {
                steps.remove(index);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl PeerResource for MockPeerResource {
    async fn create_offer(&self) -> Result<SessionDescription> {
        if self.take_failure(LocalStep::CreateOffer).await {
            bail!("offer could not be created");
        }
        self.record(ResourceCall::CreateOffer(self.remote_id.clone()))
            .await;
        Ok(SessionDescription::offer(offer_sdp(&self.remote_id)))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        if self.take_failure(LocalStep::CreateAnswer).await {
            bail!("answer could not be created");
        }
        self.record(ResourceCall::CreateAnswer(self.remote_id.clone()))
            .await;
        Ok(SessionDescription::answer(answer_sdp(&self.remote_id)))
    }

    async fn set_remote_description(&self, description: &SessionDescription) -> Result<()> {
        if self.broken {
            bail!("remote description rejected");
        }
        self.record(ResourceCall::SetRemote(
            self.remote_id.clone(),
            description.clone(),
        ))
        .await;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()> {
        if self.broken {
            bail!("candidate rejected");
        }
        self.record(ResourceCall::AddCandidate(
            self.remote_id.clone(),
            candidate.clone(),
        ))
        .await;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(ResourceCall::Close(self.remote_id.clone())).await;
        Ok(())
    }
}
