use crate::transport::{LinkState, PeerEvent, PeerResource, PeerResourceFactory, TransportConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use livecast_core::{IceCandidate, PeerId, Role, SdpKind, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// [`PeerResource`] backed by a `webrtc` peer connection.
pub struct RtcPeerResource {
    pub remote_id: PeerId,
    pub peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeerResource {
    /// Sets up a peer connection towards `remote_id`. Everything the
    /// connection reports asynchronously is pushed into `event_tx`.
    pub async fn new(
        remote_id: PeerId,
        role: Role,
        config: &TransportConfig,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        // The host publishes audio and video, so its offers must describe both.
        if role.is_host() {
            for kind in [RTPCodecType::Audio, RTPCodecType::Video] {
                peer_connection
                    .add_transceiver_from_kind(kind, None)
                    .await
                    .with_context(|| format!("Failed to add {kind} transceiver"))?;
            }
        }

        let state_tx = event_tx.clone();
        let uid_state = remote_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let uid = uid_state.clone();

                Box::pin(async move {
                    let state = match s {
                        RTCPeerConnectionState::Connecting => LinkState::Connecting,
                        RTCPeerConnectionState::Connected => LinkState::Connected,
                        RTCPeerConnectionState::Disconnected => LinkState::Disconnected,
                        RTCPeerConnectionState::Failed => LinkState::Failed,
                        RTCPeerConnectionState::Closed => LinkState::Closed,
                        _ => return,
                    };
                    let _ = tx.send(PeerEvent::ConnectionState(uid, state)).await;
                })
            },
        ));

        let uid_ice_state = remote_id.clone();
        peer_connection.on_ice_connection_state_change(Box::new(
            move |s: RTCIceConnectionState| {
                let uid = uid_ice_state.clone();
                Box::pin(async move {
                    info!("ICE connection state for {}: {}", uid, s);
                })
            },
        ));

        let ice_tx = event_tx.clone();
        let uid_ice = remote_id.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let uid = uid_ice.clone();

            Box::pin(async move {
                let Some(candidate) = c.and_then(|c| local_candidate(&uid, &c)) else {
                    return;
                };
                let _ = tx.send(PeerEvent::LocalCandidate(uid, candidate)).await;
            })
        }));

        let track_tx = event_tx;
        let uid_track = remote_id.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                let uid = uid_track.clone();

                Box::pin(async move {
                    debug!("Remote {} track from {}", track.kind(), uid);
                    let _ = tx.send(PeerEvent::Track(uid, track.kind().to_string())).await;
                })
            },
        ));

        Ok(Self {
            remote_id,
            peer_connection,
        })
    }
}

/// Converts a gathered candidate into its signaling form. Candidates that
/// cannot be serialized are logged and skipped.
fn local_candidate(remote_id: &PeerId, candidate: &RTCIceCandidate) -> Option<IceCandidate> {
    match candidate.to_json() {
        Ok(init) => Some(IceCandidate {
            candidate: init.candidate,
            sdp_mid: init.sdp_mid,
            sdp_m_line_index: init.sdp_mline_index,
            username_fragment: init.username_fragment,
        }),
        Err(e) => {
            warn!("Dropping local ICE candidate for {}: {}", remote_id, e);
            None
        }
    }
}

#[async_trait]
impl PeerResource for RtcPeerResource {
    async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_remote_description(&self, description: &SessionDescription) -> Result<()> {
        let sdp = description.sdp.clone();
        let desc = match description.kind {
            SdpKind::Offer => RTCSessionDescription::offer(sdp)?,
            SdpKind::Answer => RTCSessionDescription::answer(sdp)?,
        };
        self.peer_connection
            .set_remote_description(desc)
            .await
            .with_context(|| format!("Remote {:?} rejected for {}", description.kind, self.remote_id))?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate.clone(),
            sdp_mid: candidate.sdp_mid.clone(),
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment.clone(),
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Creates one [`RtcPeerResource`] per remote participant.
#[derive(Debug, Clone)]
pub struct RtcPeerResourceFactory {
    role: Role,
    config: TransportConfig,
}

impl RtcPeerResourceFactory {
    pub fn new(role: Role, config: TransportConfig) -> Self {
        Self { role, config }
    }
}

#[async_trait]
impl PeerResourceFactory for RtcPeerResourceFactory {
    async fn create(
        &self,
        remote_id: &PeerId,
        events: mpsc::Sender<PeerEvent>,
    ) -> Result<Box<dyn PeerResource>> {
        let resource =
            RtcPeerResource::new(remote_id.clone(), self.role, &self.config, events).await?;
        Ok(Box::new(resource))
    }
}
