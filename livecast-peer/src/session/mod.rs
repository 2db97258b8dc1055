mod peer_session;
mod session_manager;

pub use peer_session::*;
pub use session_manager::*;
