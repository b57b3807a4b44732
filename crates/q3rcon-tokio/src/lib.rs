mod common;
pub mod checks;
pub mod packet;
pub mod client;
pub mod errors;
pub mod execute;
pub mod client_config;

pub use client_config::{RconClientConfig, ServerEndpoint};
pub use client::RconClient;
pub use common::{DEFAULT_PORT, DEFAULT_TIMEOUT_MS, MIN_TIMEOUT_MS};
pub use errors::RconError;
