use std::fmt;

/// Where one peer session is in the offer/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationStage {
    /// Nothing exchanged yet.
    New,
    /// Local offer sent, waiting for the remote answer.
    OfferSent,
    /// Local and remote descriptions both applied.
    Stable,
    /// Terminal. Resources released.
    Closed,
}

impl fmt::Display for NegotiationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationStage::New => f.write_str("new"),
            NegotiationStage::OfferSent => f.write_str("offer-sent"),
            NegotiationStage::Stable => f.write_str("stable"),
            NegotiationStage::Closed => f.write_str("closed"),
        }
    }
}

/// Operations a session accepts, used when reporting conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOffer,
    ReceiveOffer,
    ReceiveAnswer,
    ReceiveCandidate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateOffer => f.write_str("create-offer"),
            Operation::ReceiveOffer => f.write_str("receive-offer"),
            Operation::ReceiveAnswer => f.write_str("receive-answer"),
            Operation::ReceiveCandidate => f.write_str("receive-candidate"),
        }
    }
}
