/// Marker prefixed to every connectionless ("out-of-band") datagram.
pub const OOB_MARKER: u32 = 0xFFFF_FFFF;
pub const OOB_MARKER_SIZE: usize = 4;

pub const RCON_PREFIX: &[u8] = b"rcon ";
pub const SEPARATOR: u8 = b' ';
pub const TERMINATOR: u8 = b'\n';

/// Largest payload a single IPv4 UDP datagram can carry.
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 27960;
pub const DEFAULT_TIMEOUT_MS: u64 = 1500;
pub const MIN_TIMEOUT_MS: u64 = 500;
