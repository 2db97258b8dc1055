use thiserror::Error;

/// Input rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("room id cannot be empty or whitespace")]
    EmptyRoomId,
}

/// Signaling payload that could not be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed signaling payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
