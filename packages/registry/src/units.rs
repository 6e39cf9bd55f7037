//! Display helpers: ether amounts, shortened addresses and block timestamps.

use chrono::DateTime;

use crate::error::RegistryError;
use crate::models::{Address, Wei};

pub const ETHER_DECIMALS: usize = 18;
const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;

/// Wei as decimal ether, trailing zeros trimmed but keeping one fractional
/// digit: `1.5`, `2.0`, `0.000000000000000001`.
pub fn format_ether(wei: Wei) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = format!("{:018}", wei % WEI_PER_ETHER);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Decimal ether to wei. Accepts up to 18 fractional digits.
pub fn parse_ether(input: &str) -> Result<Wei, RegistryError> {
    let invalid = || RegistryError::InvalidAmount(input.to_string());
    let text = input.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let whole: Wei = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: Wei = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = ETHER_DECIMALS);
        padded.parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(invalid)
}

/// `0x1234...abcd`: the first `head` and last `tail` characters of the
/// address text.
pub fn short_address(address: &Address, head: usize, tail: usize) -> String {
    let text = address.to_string();
    let start = text.get(..head).unwrap_or(&text);
    let end = text.get(text.len().saturating_sub(tail)..).unwrap_or_default();
    format!("{start}...{end}")
}

/// `0x123456...`: the first `head` characters only.
pub fn address_prefix(address: &Address, head: usize) -> String {
    let text = address.to_string();
    format!("{}...", text.get(..head).unwrap_or(&text))
}

/// Unix seconds rendered in UTC.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Time of day of a Unix timestamp, `HH:MM:SS` in UTC.
pub fn format_clock(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
