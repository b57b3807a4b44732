use std::fmt;

use crate::{
    checks::parse_port,
    common::DEFAULT_ADDRESS,
    errors::RconError,
};

/// Caller-supplied construction input for [`RconClient`](crate::RconClient).
///
/// Nothing is validated here; [`RconClient::new`](crate::RconClient::new) does that
/// and fills in defaults for the optional fields.
#[derive(Default, Debug, Clone)]
pub struct RconClientConfig {
    pub address: String,
    pub password: String,
    pub port: Option<u16>,
    /// Response timeout in milliseconds.
    pub timeout: Option<u64>,
    pub debug: bool,
}

impl RconClientConfig {
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Accepts `host` or `host:port`, the form the command line front end takes.
    pub fn from_endpoint_str(endpoint: &str, password: impl Into<String>) -> Result<Self, RconError> {
        let endpoint = ServerEndpoint::parse(endpoint)?;
        Ok(Self {
            address: endpoint.address,
            password: password.into(),
            port: endpoint.port,
            ..Default::default()
        })
    }

    pub fn port(mut self, p: u16) -> Self { self.port = Some(p); self }

    /// How long to wait for the first datagram, and then for each continuation
    /// datagram, before the response is considered complete.
    pub fn timeout(mut self, ms: u64) -> Self { self.timeout = Some(ms); self }

    /// Dumps the resolved configuration and every outgoing packet to the `debug` log.
    pub fn debug(mut self, v: bool) -> Self { self.debug = v; self }
}

/// UDP destination of a server. `port` is `None` when the input named none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    pub address: String,
    pub port: Option<u16>,
}

impl ServerEndpoint {
    /// Splits `host[:port]`. Bracketed IPv6 literals (`[::1]:27960`) are accepted,
    /// and an empty host falls back to the loopback address.
    pub fn parse(input: &str) -> Result<Self, RconError> {
        let input = input.trim();

        let (host, port) = if let Some(rest) = input.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                RconError::Configuration("address missing closing bracket".to_string())
            })?;
            match tail.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if tail.is_empty() => (host, None),
                None => {
                    return Err(RconError::Configuration(format!(
                        "address unexpected characters after ']': {}", tail
                    )));
                }
            }
        } else if input.matches(':').count() > 1 {
            // Bare IPv6 literal without a port.
            (input, None)
        } else {
            match input.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (input, None),
            }
        };

        // `host:` carries no port.
        let port = port.filter(|p| !p.is_empty());
        let port = port.map(parse_port).transpose().map_err(RconError::Configuration)?;
        let address = if host.is_empty() { DEFAULT_ADDRESS } else { host };

        Ok(Self { address: address.to_string(), port })
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = if self.address.contains(':') {
            format!("[{}]", self.address)
        } else {
            self.address.clone()
        };
        match self.port {
            Some(port) => write!(f, "{}:{}", host, port),
            None => write!(f, "{}", host),
        }
    }
}
