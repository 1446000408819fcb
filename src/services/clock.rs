//! Wall-clock helpers shared by presence and message services.

use std::time::{SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;
use time::macros::format_description;

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Format an epoch-millisecond timestamp as `HH:MM:SS` (UTC).
#[must_use]
pub fn clock_time(ms: i64) -> String {
    let nanos = i128::from(ms) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(format_description!("[hour]:[minute]:[second]")).ok())
        .unwrap_or_else(|| "00:00:00".to_owned())
}
