mod participant;
mod participant_event;

pub use participant::*;
pub use participant_event::*;
