//! Integration tests for livecast-peer.
//!
//! Tests are organized by functionality:
//! - `host_tests` - offers, answers and candidate buffering on the host side
//! - `viewer_tests` - answering the host and early candidates
//! - `manager_tests` - session table, routing and failure isolation
//! - `participant_tests` - full exchanges and the participant event loop


use livecast_core::{PeerId, Role};
use livecast_peer::{PeerEvent, PeerSessionManager};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::{MockResourceFactory, MockSignalingOutput};

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestManager {
    pub manager: PeerSessionManager,
    pub factory: MockResourceFactory,
    pub signaling: MockSignalingOutput,
    pub peer_rx: mpsc::Receiver<PeerEvent>,
}

/// Create a session manager wired to mock resources and signaling.
pub fn create_test_manager(local_id: &str, role: Role) -> TestManager {
    let factory = MockResourceFactory::new();
    let signaling = MockSignalingOutput::new_stored_only();
    let (peer_tx, peer_rx) = mpsc::channel(64);

    let manager = PeerSessionManager::new(
        PeerId::from(local_id),
        role,
        Arc::new(factory.clone()),
        Arc::new(signaling.clone()),
        peer_tx,
    );

    TestManager {
        manager,
        factory,
        signaling,
        peer_rx,
    }
}

pub fn candidate(n: u32) -> livecast_core::IceCandidate {
    livecast_core::IceCandidate {
        candidate: format!("candidate:{n} 1 udp 2122260223 192.168.1.{n} 5000{n} typ host"),
        sdp_mid: Some("0".into()),
        sdp_m_line_index: Some(0),
        username_fragment: None,
    }
}
