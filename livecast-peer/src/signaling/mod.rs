mod relay_signaling;
mod signaling_output;

pub use relay_signaling::*;
pub use signaling_output::*;
