mod peer_resource;
mod rtc_resource;
mod transport_config;
mod transport_event;

pub use peer_resource::*;
pub use rtc_resource::*;
pub use transport_config::*;
pub use transport_event::*;
