use thiserror::Error;

#[derive(Debug, Error)]
pub enum RconError {
    /// Bad client construction input.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Bad per-call arguments (command or timeout).
    #[error("validation error: {0}")]
    Validation(String),

    #[error("packet error: {0}")]
    Packet(String),

    /// Transport failure while resolving, binding, transmitting or receiving.
    #[error("send error: {0}")]
    Send(std::io::Error),

    /// No datagram arrived before the connect timeout fired.
    #[error("connection.send TIMEOUT")]
    Timeout,
}

impl From<std::io::Error> for RconError {
    fn from(e: std::io::Error) -> Self { RconError::Send(e) }
}
