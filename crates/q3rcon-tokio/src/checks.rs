//! Field guards shared by client construction and [`RconClient::send`](crate::RconClient).
//!
//! Every failure message starts with the name of the field it concerns so it
//! can be diagnosed without a backtrace. Callers wrap the message into the
//! matching [`RconError`](crate::errors::RconError) variant.

use crate::common::MIN_TIMEOUT_MS;

fn check_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} length smaller or equals zero", field));
    }
    Ok(())
}

fn parse_non_negative(field: &str, value: &str) -> Result<u64, String> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{} not a number", field))?;

    if parsed < 0 {
        return Err(format!("{} number not positive", field));
    }
    Ok(parsed as u64)
}

pub fn check_address(address: &str) -> Result<(), String> {
    check_non_empty("address", address)
}

pub fn check_password(password: &str) -> Result<(), String> {
    check_non_empty("password", password)
}

pub fn check_command(command: &str) -> Result<(), String> {
    check_non_empty("command", command)
}

pub fn parse_port(port: &str) -> Result<u16, String> {
    let parsed = parse_non_negative("port", port)?;
    u16::try_from(parsed).map_err(|_| "port number out of range".to_string())
}

/// The floor applies to every timeout source: client default and per-call override alike.
pub fn check_timeout(timeout_ms: u64) -> Result<(), String> {
    if timeout_ms < MIN_TIMEOUT_MS {
        return Err(format!("timeout below {} milliseconds", MIN_TIMEOUT_MS));
    }
    Ok(())
}

pub fn parse_timeout(timeout: &str) -> Result<u64, String> {
    let parsed = parse_non_negative("timeout", timeout)?;
    check_timeout(parsed)?;
    Ok(parsed)
}
