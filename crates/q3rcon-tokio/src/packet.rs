use crate::{
    common::{
        MAX_DATAGRAM_SIZE,
        OOB_MARKER,
        OOB_MARKER_SIZE,
        RCON_PREFIX,
        SEPARATOR,
        TERMINATOR,
    },
    errors::RconError,
};

const SEPARATOR_SIZE: usize = 1;
const TERMINATOR_SIZE: usize = 1;

/// Marker, `"rcon "`, separator and terminator: 4 + 5 + 1 + 1.
pub const PACKET_OVERHEAD: usize =
    OOB_MARKER_SIZE + RCON_PREFIX.len() + SEPARATOR_SIZE + TERMINATOR_SIZE;

/// Builds `\xFF\xFF\xFF\xFFrcon <password> <command>\n`.
///
/// Lengths are byte lengths, so the packet is always
/// `11 + password.len() + command.len()` bytes long.
pub fn build_packet(password: &str, command: &str) -> Result<Vec<u8>, RconError> {
    let size = PACKET_OVERHEAD + password.len() + command.len();
    if size > MAX_DATAGRAM_SIZE {
        return Err(RconError::Packet(format!(
            "packet size {} exceeds maximum datagram size {}", size, MAX_DATAGRAM_SIZE
        )));
    }

    let mut buffer = Vec::with_capacity(size);
    buffer.extend_from_slice(&OOB_MARKER.to_le_bytes());
    buffer.extend_from_slice(RCON_PREFIX);
    buffer.extend_from_slice(password.as_bytes());
    buffer.push(SEPARATOR);
    buffer.extend_from_slice(command.as_bytes());
    buffer.push(TERMINATOR);
    Ok(buffer)
}

/// Everything after the marker, minus the trailing newline, as readable text.
pub fn payload_text(packet: &[u8]) -> String {
    let body = packet.get(OOB_MARKER_SIZE..).unwrap_or_default();
    let body = body.strip_suffix(&[TERMINATOR]).unwrap_or(body);
    String::from_utf8_lossy(body).into_owned()
}

/// Strips the 4-byte header of an inbound datagram and returns the trimmed text.
///
/// Servers colour their output with raw bytes, so invalid UTF-8 is replaced rather than rejected.
pub fn decode_datagram(datagram: &[u8]) -> String {
    let body = datagram.get(OOB_MARKER_SIZE..).unwrap_or_default();
    String::from_utf8_lossy(body).trim().to_string()
}
