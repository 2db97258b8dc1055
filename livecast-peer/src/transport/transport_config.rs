use livecast_core::IceServerConfig;
use livecast_core::utils::default_ice_servers;

/// Configuration for WebRTC peer connections.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: default_ice_servers(),
        }
    }
}

impl TransportConfig {
    /// Uses the servers the relay advertised, falling back to the defaults
    /// when it sent none.
    pub fn from_advertised(ice_servers: Vec<IceServerConfig>) -> Self {
        if ice_servers.is_empty() {
            return Self::default();
        }
        Self { ice_servers }
    }
}
