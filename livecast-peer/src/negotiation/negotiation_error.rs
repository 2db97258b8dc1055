use crate::negotiation::{NegotiationStage, Operation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NegotiationError {
    /// The operation does not fit the current stage. Never fatal.
    #[error("{operation} rejected in stage {stage}")]
    StageConflict {
        stage: NegotiationStage,
        operation: Operation,
    },

    #[error("{operation} on a closed session")]
    Closed { operation: Operation },

    /// The peer-connection resource refused a description or candidate.
    #[error("peer connection failed: {0}")]
    Resource(String),
}

impl NegotiationError {
    pub(crate) fn resource(err: anyhow::Error) -> Self {
        Self::Resource(format!("{err:#}"))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, NegotiationError::StageConflict { .. })
    }
}
