use livecast_core::IceServerConfig;
use livecast_core::utils::default_ice_servers;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
pub const DEFAULT_ROUTE: &str = "/livestream";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Path the WebSocket endpoint is mounted on.
    pub route: String,
    /// Advertised to every connection in its `Welcome`.
    pub ice_servers: Vec<IceServerConfig>,
    pub allow_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            route: DEFAULT_ROUTE.to_string(),
            ice_servers: default_ice_servers(),
            allow_cors: true,
        }
    }
}
