//! Time utilities.
//!
//! Connection bookkeeping and client-side display both use Unix millisecond
//! timestamps; the conversions live here so server and client agree on the
//! format.

use chrono::{DateTime, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix millisecond timestamp to an RFC 3339 string (UTC).
///
/// Timestamps outside chrono's representable range fall back to the raw
/// number so display code never panics on garbage input.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_millis) {
        Some(dt) => dt.to_rfc3339(),
        None => format!("{timestamp_millis}ms"),
    }
}
