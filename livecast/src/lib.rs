pub use livecast_core::codec;
pub use livecast_core::model::{PeerId, Role, RoomId};

pub mod model {
    pub use livecast_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use livecast_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use livecast_peer::*;
}
