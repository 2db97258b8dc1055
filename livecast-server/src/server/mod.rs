mod serve;
mod server_config;

pub use serve::*;
pub use server_config::*;
