use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use tokio::{
    net::{lookup_host, UdpSocket},
    time::timeout,
};

use crate::{
    checks::{check_command, check_timeout},
    client::RconClient,
    common::MAX_DATAGRAM_SIZE,
    errors::RconError,
    packet::{build_packet, decode_datagram, payload_text},
};

impl RconClient {
    /// Sends `command` and waits for the server's reply using the client's default timeout.
    ///
    /// ### Returns
    /// - The text of every datagram received, header stripped and trimmed, concatenated in arrival order.
    /// - `RconError::Timeout` if the server never replied within the timeout.
    pub async fn send(&self, command: &str) -> Result<String, RconError> {
        self.send_with_timeout(command, self.timeout_ms).await
    }

    /// Like [`send`](Self::send), with `timeout_ms` overriding the client default for this call only.
    ///
    /// The same timeout bounds the wait for the first datagram and the wait
    /// between continuation datagrams. A small value lowers latency but may
    /// truncate responses the server splits across several datagrams.
    pub async fn send_with_timeout(&self, command: &str, timeout_ms: u64) -> Result<String, RconError> {
        let socket = self.transmit(command, timeout_ms).await?;
        let response = collect_response(&socket, Duration::from_millis(timeout_ms)).await;
        drop(socket);
        log::debug!("Socket closed");
        response
    }

    /// Sends `command` without waiting for a reply.
    ///
    /// Resolves as soon as the datagram has been handed to the transport. A
    /// transmit failure is reported, and the socket is closed either way.
    pub async fn send_no_reply(&self, command: &str) -> Result<(), RconError> {
        self.send_no_reply_with_timeout(command, self.timeout_ms).await
    }

    /// Like [`send_no_reply`](Self::send_no_reply). The timeout is only validated,
    /// so an override below the floor is rejected exactly as it is for [`send_with_timeout`](Self::send_with_timeout).
    pub async fn send_no_reply_with_timeout(&self, command: &str, timeout_ms: u64) -> Result<(), RconError> {
        let socket = self.transmit(command, timeout_ms).await?;
        drop(socket);
        log::debug!("No response expected, socket closed");
        Ok(())
    }

    /// Validates the call, builds the packet and hands it to a fresh socket.
    async fn transmit(&self, command: &str, timeout_ms: u64) -> Result<UdpSocket, RconError> {
        check_command(command).map_err(RconError::Validation)?;
        check_timeout(timeout_ms).map_err(RconError::Validation)?;

        let packet = build_packet(&self.password, command)?;
        if self.debug {
            log::debug!(
                "Sending {:?} to {} using password {:?} ({})",
                command, self.endpoint(), self.password, payload_text(&packet)
            );
        }

        let target = self.resolve().await?;
        let socket = UdpSocket::bind(unspecified_for(&target)).await?;

        let sent = socket.send_to(&packet, target).await?;
        if sent != packet.len() {
            return Err(RconError::Send(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sent {} of {} bytes", sent, packet.len()),
            )));
        }
        log::debug!("Sent {} byte packet to {}", sent, target);

        Ok(socket)
    }

    async fn resolve(&self) -> Result<SocketAddr, RconError> {
        let addrs = lookup_host((self.address.as_str(), self.port)).await?;
        pick_target(addrs)
            .ok_or_else(|| RconError::Send(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses found for {}", self.address),
            )))
    }
}

/// First IPv4 address, else the first address.
fn pick_target(addrs: impl IntoIterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

fn unspecified_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    }
}

/// Waits for the reply to a transmitted packet.
///
/// Two distinct timers run here. The connect timeout bounds the wait for the
/// first datagram and fails the call when it fires. After that, an
/// inter-message timeout is re-armed after every datagram, and its expiry is
/// what completes the response.
async fn collect_response(socket: &UdpSocket, wait_for: Duration) -> Result<String, RconError> {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
    let mut response = String::new();

    let (len, peer) = timeout(wait_for, socket.recv_from(&mut buf))
        .await
        .map_err(|_| {
            log::debug!("Connect timeout reached after {:?} without any datagram", wait_for);
            RconError::Timeout
        })??;
    log::debug!("Received {} byte datagram from {}", len, peer);
    response.push_str(&decode_datagram(&buf[..len]));
    let mut received = 1;

    loop {
        match timeout(wait_for, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, peer))) => {
                log::debug!("Received {} byte continuation datagram from {}", len, peer);
                response.push_str(&decode_datagram(&buf[..len]));
                received += 1;
            },
            Ok(Err(e)) => {
                return Err(RconError::Send(e));
            },
            Err(_) => {
                log::debug!("Inter-message timeout reached after {} datagram(s), returning response", received);
                break;
            }
        }
    }

    Ok(response)
}
