//! Timestamp conversion.
//!
//! Timestamps travel as an unsigned hyper counting nanoseconds since the
//! Unix epoch, always in UTC.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Convert nanoseconds since the Unix epoch to a UTC instant.
pub fn timestamp_from_nanos(nanos: u64) -> Result<DateTime<Utc>> {
    let secs = (nanos / NANOS_PER_SEC) as i64;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    DateTime::from_timestamp(secs, subsec).ok_or(Error::TimestampOutOfRange(nanos))
}

/// Convert a UTC instant to nanoseconds since the Unix epoch.
///
/// Instants before the epoch, or too far in the future for a u64
/// nanosecond count, are rejected.
pub fn timestamp_to_nanos(ts: &DateTime<Utc>) -> Result<u64> {
    let secs = ts.timestamp();
    if secs < 0 {
        return Err(Error::NegativeTimestamp(secs));
    }
    (secs as u64)
        .checked_mul(NANOS_PER_SEC)
        .and_then(|n| n.checked_add(ts.timestamp_subsec_nanos() as u64))
        .ok_or(Error::TimestampOverflow(secs))
}
