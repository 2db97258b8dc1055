pub mod codec;
pub mod error;
pub mod model;
pub mod utils;

pub use codec::Decoded;
pub use error::{CodecError, ValidationError};
pub use model::*;
