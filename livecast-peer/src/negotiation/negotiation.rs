use crate::negotiation::{NegotiationError, NegotiationStage, Operation};
use livecast_core::SessionDescription;

/// What to do with a remote offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDisposition {
    /// Apply it and answer.
    Accept,
    /// A local offer is outstanding; the remote offer was parked.
    Parked,
}

/// Stage bookkeeping for one peer session.
///
/// Only decides whether a step is allowed and records where the session
/// ended up; applying descriptions is left to [`crate::PeerSession`].
#[derive(Debug)]
pub struct Negotiation {
    stage: NegotiationStage,
    parked_offer: Option<SessionDescription>,
}

impl Default for Negotiation {
    fn default() -> Self {
        Self::new()
    }
}

impl Negotiation {
    pub fn new() -> Self {
        Self {
            stage: NegotiationStage::New,
            parked_offer: None,
        }
    }

    pub fn stage(&self) -> NegotiationStage {
        self.stage
    }

    pub fn has_parked_offer(&self) -> bool {
        self.parked_offer.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.stage == NegotiationStage::Closed
    }

    pub fn check_create_offer(&self) -> Result<(), NegotiationError> {
        let operation = Operation::CreateOffer;
        match self.stage {
            NegotiationStage::Closed => Err(NegotiationError::Closed { operation }),
            NegotiationStage::OfferSent => Err(self.conflict(operation)),
            _ if self.parked_offer.is_some() => Err(self.conflict(operation)),
            NegotiationStage::New | NegotiationStage::Stable => Ok(()),
        }
    }

    pub fn offer_sent(&mut self) {
        self.stage = NegotiationStage::OfferSent;
    }

    /// Classifies a remote offer. In `OfferSent` the offer is parked here and
    /// the stage is left alone.
    pub fn on_remote_offer(
        &mut self,
        offer: &SessionDescription,
    ) -> Result<OfferDisposition, NegotiationError> {
        match self.stage {
            NegotiationStage::Closed => Err(NegotiationError::Closed {
                operation: Operation::ReceiveOffer,
            }),
            NegotiationStage::OfferSent => {
                self.parked_offer = Some(offer.clone());
                Ok(OfferDisposition::Parked)
            }
            NegotiationStage::New | NegotiationStage::Stable => Ok(OfferDisposition::Accept),
        }
    }

    pub fn answer_sent(&mut self) {
        self.stage = NegotiationStage::Stable;
    }

    pub fn check_answer(&self) -> Result<(), NegotiationError> {
        let operation = Operation::ReceiveAnswer;
        match self.stage {
            NegotiationStage::OfferSent => Ok(()),
            NegotiationStage::Closed => Err(NegotiationError::Closed { operation }),
            _ => Err(self.conflict(operation)),
        }
    }

    /// Moves to `Stable` after the remote answer was applied. Returns the
    /// offer parked during glare, which is not replayed.
    pub fn answer_applied(&mut self) -> Option<SessionDescription> {
        self.stage = NegotiationStage::Stable;
        self.parked_offer.take()
    }

    /// Returns `false` when already closed.
    pub fn close(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        self.stage = NegotiationStage::Closed;
        self.parked_offer = None;
        true
    }

    fn conflict(&self, operation: Operation) -> NegotiationError {
        NegotiationError::StageConflict {
            stage: self.stage,
            operation,
        }
    }
}
