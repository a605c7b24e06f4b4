/*!
 Conversions for the tick-based time values .NET serializes.

 Both `DateTime` and `TimeSpan` count in 100 ns ticks; `DateTime` counts from
 0001-01-01T00:00:00, which predates the Unix epoch by 62,135,596,800 seconds.
*/

use chrono::{TimeZone, Utc};

use crate::nrbf::models::{DateTime, DateTimeKind};

/// Number of 100 ns ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Ticks between 0001-01-01T00:00:00 and 1970-01-01T00:00:00
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;
/// Number of seconds in a day
const SECONDS_PER_DAY: u64 = 86_400;

/// Convert a .NET tick count to a UTC timestamp, if it falls in a representable range
pub fn to_utc(ticks: u64) -> Option<chrono::DateTime<Utc>> {
    let offset_ticks = i64::try_from(ticks).ok()?.checked_sub(UNIX_EPOCH_TICKS)?;
    let seconds = offset_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = offset_ticks.rem_euclid(TICKS_PER_SECOND) * 100;
    Utc.timestamp_opt(seconds, nanos as u32).single()
}

/// Render a decoded `DateTime` as an RFC 3339 timestamp.
///
/// `Local` and `Unspecified` kinds are rendered as their UTC tick value; the stream
/// does not carry the writer's offset.
pub fn format_datetime(datetime: &DateTime) -> Option<String> {
    let timestamp = to_utc(datetime.ticks)?;
    let suffix = match datetime.kind {
        DateTimeKind::Utc => "",
        DateTimeKind::Local => " (local)",
        DateTimeKind::Unspecified => " (unspecified)",
    };
    Some(format!("{}{suffix}", timestamp.to_rfc3339()))
}

/// Render a `TimeSpan` tick count the way .NET prints one: `[-][d.]hh:mm:ss[.fffffff]`
pub fn format_timespan(ticks: i64) -> String {
    let sign = if ticks < 0 { "-" } else { "" };
    let magnitude = ticks.unsigned_abs();
    let fraction = magnitude % TICKS_PER_SECOND as u64;
    let total_seconds = magnitude / TICKS_PER_SECOND as u64;
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = (total_seconds / 3_600) % 24;
    let days = total_seconds / SECONDS_PER_DAY;

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if fraction > 0 {
        out.push_str(&format!(".{fraction:07}"));
    }
    out
}
