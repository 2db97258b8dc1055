mod room;
mod server;
mod signaling;

pub use room::*;
pub use server::*;
pub use signaling::*;
