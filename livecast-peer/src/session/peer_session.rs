use crate::negotiation::{
    Negotiation, NegotiationError, NegotiationStage, OfferDisposition, Operation,
};
use crate::signaling::SignalingOutput;
use crate::transport::PeerResource;
use livecast_core::{IceCandidate, PeerId, SessionDescription, SignalingMessage};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Negotiation with one remote participant.
///
/// Owns the peer-connection resource and the queue of remote candidates that
/// arrived before a remote description could take them.
pub struct PeerSession {
    remote_id: PeerId,
    negotiation: Negotiation,
    resource: Box<dyn PeerResource>,
    local_description: Option<SessionDescription>,
    remote_description: Option<SessionDescription>,
    /// Remote offer the resource accepted but could not answer yet.
    unanswered_offer: Option<SessionDescription>,
    pending_candidates: VecDeque<IceCandidate>,
    last_failure: Option<String>,
}

impl PeerSession {
    pub fn new(remote_id: PeerId, resource: Box<dyn PeerResource>) -> Self {
        Self {
            remote_id,
            negotiation: Negotiation::new(),
            resource,
            local_description: None,
            remote_description: None,
            unanswered_offer: None,
            pending_candidates: VecDeque::new(),
            last_failure: None,
        }
    }

    pub fn remote_id(&self) -> &PeerId {
        &self.remote_id
    }

    pub fn stage(&self) -> NegotiationStage {
        self.negotiation.stage()
    }

    /// A remote offer arrived during glare and is being held.
    pub fn has_pending_offer(&self) -> bool {
        self.negotiation.has_parked_offer()
    }

    pub fn buffered_candidates(&self) -> impl Iterator<Item = &IceCandidate> {
        self.pending_candidates.iter()
    }

    pub fn local_description(&self) -> Option<&SessionDescription> {
        self.local_description.as_ref()
    }

    pub fn remote_description(&self) -> Option<&SessionDescription> {
        self.remote_description.as_ref()
    }

    /// Last error reported by the peer-connection resource.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub async fn create_offer(
        &mut self,
        signaling: &dyn SignalingOutput,
    ) -> Result<(), NegotiationError> {
        self.negotiation.check_create_offer()?;

        let offer = self
            .resource
            .create_offer()
            .await
            .map_err(|e| self.fail(e))?;

        self.local_description = Some(offer.clone());
        self.negotiation.offer_sent();
        signaling
            .send_signal(SignalingMessage::Offer {
                remote_id: self.remote_id.clone(),
                description: offer,
            })
            .await;
        Ok(())
    }

    /// Applies a remote offer and answers it, unless a local offer is
    /// outstanding, in which case the offer is parked and a conflict returned.
    pub async fn receive_offer(
        &mut self,
        offer: SessionDescription,
        signaling: &dyn SignalingOutput,
    ) -> Result<(), NegotiationError> {
        if self.negotiation.on_remote_offer(&offer)? == OfferDisposition::Parked {
            return Err(NegotiationError::StageConflict {
                stage: self.stage(),
                operation: Operation::ReceiveOffer,
            });
        }

        // A resend of an offer whose answer failed is answered without
        // applying it a second time.
        if self.unanswered_offer.as_ref() != Some(&offer) {
            self.resource
                .set_remote_description(&offer)
                .await
                .map_err(|e| self.fail(e))?;
            self.unanswered_offer = Some(offer);
        }

        let answer = self
            .resource
            .create_answer()
            .await
            .map_err(|e| self.fail(e))?;
        self.remote_description = self.unanswered_offer.take();
        self.local_description = Some(answer.clone());
        self.negotiation.answer_sent();

        signaling
            .send_signal(SignalingMessage::Answer {
                remote_id: self.remote_id.clone(),
                description: answer,
            })
            .await;

        self.flush_candidates().await;
        Ok(())
    }

    pub async fn receive_answer(
        &mut self,
        answer: SessionDescription,
    ) -> Result<(), NegotiationError> {
        self.negotiation.check_answer()?;

        self.resource
            .set_remote_description(&answer)
            .await
            .map_err(|e| self.fail(e))?;
        self.remote_description = Some(answer);

        if let Some(parked) = self.negotiation.answer_applied() {
            warn!(
                "Discarding offer from {} parked during glare ({} bytes of SDP)",
                self.remote_id,
                parked.sdp.len()
            );
        }

        self.flush_candidates().await;
        Ok(())
    }

    /// Applies the candidate right away once the session is `Stable`,
    /// otherwise queues it.
    pub async fn receive_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationError> {
        if self.negotiation.is_closed() {
            return Err(NegotiationError::Closed {
                operation: Operation::ReceiveCandidate,
            });
        }

        if self.stage() != NegotiationStage::Stable {
            debug!(
                "Queueing ICE candidate from {} until the session is stable",
                self.remote_id
            );
            self.pending_candidates.push_back(candidate);
            return Ok(());
        }

        self.resource
            .add_ice_candidate(&candidate)
            .await
            .map_err(|e| self.fail(e))
    }

    /// Idempotent.
    pub async fn close(&mut self) {
        if !self.negotiation.close() {
            return;
        }

        self.pending_candidates.clear();
        self.unanswered_offer = None;
        if let Err(e) = self.resource.close().await {
            warn!("Failed to close peer connection for {}: {:#}", self.remote_id, e);
        }
        info!("Closed session with {}", self.remote_id);
    }

    async fn flush_candidates(&mut self) {
        if self.pending_candidates.is_empty() {
            return;
        }

        let queued = std::mem::take(&mut self.pending_candidates);
        debug!(
            "Applying {} queued ICE candidates from {}",
            queued.len(),
            self.remote_id
        );
        for candidate in queued {
            if let Err(e) = self.resource.add_ice_candidate(&candidate).await {
                let err = self.fail(e);
                warn!("Queued ICE candidate from {} rejected: {}", self.remote_id, err);
            }
        }
    }

    fn fail(&mut self, err: anyhow::Error) -> NegotiationError {
        let err = NegotiationError::resource(err);
        self.last_failure = Some(err.to_string());
        err
    }
}
