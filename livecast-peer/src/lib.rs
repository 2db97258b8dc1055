mod negotiation;
mod participant;
mod session;
mod signaling;
mod transport;

pub use negotiation::*;
pub use participant::*;
pub use session::*;
pub use signaling::*;
pub use transport::*;
