mod negotiation;
mod negotiation_error;
mod negotiation_stage;

pub use negotiation::*;
pub use negotiation_error::*;
pub use negotiation_stage::*;
