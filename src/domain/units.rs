//! Value and time formatting: wei/gwei/ether, block timestamps

use alloy_primitives::U256;
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

pub const GWEI_DECIMALS: u8 = 9;
pub const ETHER_DECIMALS: u8 = 18;

/// How fee and value quantities are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnitFormat {
    /// Values in ether, gas prices in gwei
    #[default]
    Human,
    /// Every quantity as an integer number of wei
    Raw,
}

/// Scale `value` down by `10^decimals`.
///
/// Trailing zeros are trimmed but one fractional digit is always kept,
/// so one ether renders as `1.0`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / base;
    let remainder = value % base;

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

/// Block timestamp in the operator's local time zone
pub fn format_local_time(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("invalid timestamp {}", ts))
}

/// Block timestamp as ISO-8601 UTC with millisecond precision
pub fn format_iso_time(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("invalid timestamp {}", ts))
}
