//! JSON form of [`SignalingMessage`] as it travels through the relay.
//!
//! Every payload is broadcast to the whole room, so the wire form names both
//! ends: `remoteId` is the addressee, `senderId` the participant that wrote
//! it. Decoding is done from the point of view of one local participant and
//! drops anything addressed to someone else.

use crate::error::CodecError;
use crate::model::{IceCandidate, PeerId, SessionDescription, SignalingMessage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum WireSignal {
    Offer {
        description: SessionDescription,
        #[serde(rename = "remoteId")]
        remote_id: PeerId,
        #[serde(rename = "senderId")]
        sender_id: PeerId,
    },
    Answer {
        description: SessionDescription,
        #[serde(rename = "remoteId")]
        remote_id: PeerId,
        #[serde(rename = "senderId")]
        sender_id: PeerId,
    },
    Candidate {
        candidate: IceCandidate,
        #[serde(rename = "remoteId")]
        remote_id: PeerId,
        #[serde(rename = "senderId")]
        sender_id: PeerId,
    },
}

/// Outcome of decoding a relayed payload for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Addressed to us; `remote_id` is the sender.
    Addressed(SignalingMessage),
    /// Well-formed but meant for another participant.
    NotForUs { addressee: PeerId },
}

pub fn encode(local_id: &PeerId, msg: &SignalingMessage) -> Result<String, CodecError> {
    let sender_id = local_id.clone();
    let wire = match msg.clone() {
        SignalingMessage::Offer {
            remote_id,
            description,
        } => WireSignal::Offer {
            description,
            remote_id,
            sender_id,
        },
        SignalingMessage::Answer {
            remote_id,
            description,
        } => WireSignal::Answer {
            description,
            remote_id,
            sender_id,
        },
        SignalingMessage::Candidate {
            remote_id,
            candidate,
        } => WireSignal::Candidate {
            candidate,
            remote_id,
            sender_id,
        },
    };
    Ok(serde_json::to_string(&wire)?)
}

pub fn decode(local_id: &PeerId, payload: &str) -> Result<Decoded, CodecError> {
    let wire: WireSignal = serde_json::from_str(payload)?;

    let (addressee, msg) = match wire {
        WireSignal::Offer {
            description,
            remote_id,
            sender_id,
        } => (
            remote_id,
            SignalingMessage::Offer {
                remote_id: sender_id,
                description,
            },
        ),
        WireSignal::Answer {
            description,
            remote_id,
            sender_id,
        } => (
            remote_id,
            SignalingMessage::Answer {
                remote_id: sender_id,
                description,
            },
        ),
        WireSignal::Candidate {
            candidate,
            remote_id,
            sender_id,
        } => (
            remote_id,
            SignalingMessage::Candidate {
                remote_id: sender_id,
                candidate,
            },
        ),
    };

    if &addressee != local_id {
        return Ok(Decoded::NotForUs { addressee });
    }
    Ok(Decoded::Addressed(msg))
}
