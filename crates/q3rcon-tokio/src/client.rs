use std::time::Duration;

use crate::{
    checks::{check_address, check_password, check_timeout},
    common::{DEFAULT_PORT, DEFAULT_TIMEOUT_MS},
    errors::RconError,
    RconClientConfig,
    ServerEndpoint,
};

/// A validated, immutable handle on one server.
///
/// Holds no sockets: every send opens and closes its own, so one client can be
/// shared between concurrent sends.
#[derive(Debug, Clone)]
pub struct RconClient {
    pub(crate) address: String,
    pub(crate) port: u16,
    pub(crate) password: String,
    pub(crate) timeout_ms: u64,
    pub(crate) debug: bool,
}

impl RconClient {
    /// Validates `config` in the order address, password, port, timeout and
    /// returns the first failure as [`RconError::Configuration`].
    pub fn new(config: RconClientConfig) -> Result<Self, RconError> {
        check_address(&config.address).map_err(RconError::Configuration)?;
        check_password(&config.password).map_err(RconError::Configuration)?;
        // `u16` rules out negative and oversized ports; see `checks::parse_port` for text input.
        let port = config.port.unwrap_or(DEFAULT_PORT);
        let timeout_ms = config.timeout.unwrap_or(DEFAULT_TIMEOUT_MS);
        check_timeout(timeout_ms).map_err(RconError::Configuration)?;

        let client = RconClient {
            address: config.address,
            port,
            password: config.password,
            timeout_ms,
            debug: config.debug,
        };

        if client.debug {
            log::debug!(
                "RconClient configured: server={} password={:?} timeout={}ms debug={}",
                client.endpoint(), client.password, client.timeout_ms, client.debug
            );
        }

        Ok(client)
    }

    pub fn address(&self) -> &str { &self.address }

    pub fn port(&self) -> u16 { self.port }

    /// The resolved destination, port included.
    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint { address: self.address.clone(), port: Some(self.port) }
    }

    /// Default response timeout used when a send passes no override.
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_ms) }

    pub fn debug(&self) -> bool { self.debug }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_applied() {
        let client = RconClient::new(RconClientConfig::new("localhost", "pw")).unwrap();
        assert_eq!(client.port(), 27960);
        assert_eq!(client.timeout(), Duration::from_millis(1500));
        assert!(!client.debug());
    }

    #[test]
    fn explicit_fields_are_kept() {
        let config = RconClientConfig::new("10.0.0.1", "pw").port(27961).timeout(750).debug(true);
        let client = RconClient::new(config).unwrap();
        assert_eq!(client.address(), "10.0.0.1");
        assert_eq!(client.port(), 27961);
        assert_eq!(client.timeout(), Duration::from_millis(750));
        assert!(client.debug());
    }

    #[test]
    fn endpoint_displays_with_resolved_port() {
        let client = RconClient::new(RconClientConfig::new("localhost", "pw")).unwrap();
        assert_eq!(client.endpoint().to_string(), "localhost:27960");

        let client = RconClient::new(RconClientConfig::new("::1", "pw").port(27961)).unwrap();
        assert_eq!(client.endpoint().to_string(), "[::1]:27961");
    }

    #[test]
    fn empty_address_fails_naming_address() {
        let err = RconClient::new(RconClientConfig::new("", "pw")).unwrap_err();
        assert!(matches!(err, RconError::Configuration(_)));
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn empty_password_fails_naming_password() {
        let err = RconClient::new(RconClientConfig::new("localhost", "")).unwrap_err();
        assert!(matches!(err, RconError::Configuration(_)));
        assert!(err.to_string().contains("password length smaller or equals zero"));
    }

    #[test]
    fn address_is_checked_before_password() {
        let err = RconClient::new(RconClientConfig::new("", "")).unwrap_err();
        assert!(err.to_string().contains("address"));
        assert!(!err.to_string().contains("password"));
    }

    #[test]
    fn password_is_checked_before_timeout() {
        let err = RconClient::new(RconClientConfig::new("localhost", "").timeout(1)).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    proptest! {
        #[test]
        fn default_port_for_any_valid_pair(address in "[a-z0-9.]{1,40}", password in "\\PC{1,40}") {
            let client = RconClient::new(RconClientConfig::new(address, password)).unwrap();
            prop_assert_eq!(client.port(), 27960);
        }

        #[test]
        fn timeouts_below_floor_are_rejected(ms in 0u64..500) {
            let err = RconClient::new(RconClientConfig::new("localhost", "pw").timeout(ms)).unwrap_err();
            prop_assert!(err.to_string().contains("timeout below 500 milliseconds"));
        }

        #[test]
        fn timeouts_at_or_above_floor_are_accepted(ms in 500u64..600_000) {
            let client = RconClient::new(RconClientConfig::new("localhost", "pw").timeout(ms)).unwrap();
            prop_assert_eq!(client.timeout(), Duration::from_millis(ms));
        }
    }
}
