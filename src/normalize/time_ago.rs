//! Compact relative timestamps for swap history rows.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Formats `timestamp` (seconds since the epoch) relative to `now`.
///
/// Uses the largest whole unit: `"42s"`, `"5m"`, `"3h"`, `"2d"`, `"4mo"`,
/// `"1y"`. Timestamps ahead of `now` (clock skew) render as `"0s"`.
#[must_use]
pub fn format_time_ago(timestamp: i64, now: DateTime<Utc>) -> String {
    let elapsed = now.timestamp().saturating_sub(timestamp).max(0);
    let (value, unit) = match elapsed {
        e if e < MINUTE => (e, "s"),
        e if e < HOUR => (e / MINUTE, "m"),
        e if e < DAY => (e / HOUR, "h"),
        e if e < MONTH => (e / DAY, "d"),
        e if e < YEAR => (e / MONTH, "mo"),
        e => (e / YEAR, "y"),
    };
    format!("{value}{unit}")
}
