//! Expiry Policy Module
//!
//! Decides whether a note is live or expired, and defines the canonical
//! timestamp form shared by storage and the HTTP API.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

use crate::error::{NoteError, Result};

// == Is Expired ==
/// Checks whether a note expiring at `expires_at` has expired at `now`.
///
/// Boundary condition: a note is still live at the exact instant it expires.
/// It only becomes expired once `now` is strictly past `expires_at`.
///
/// Every path that reads a note goes through this predicate. The sweeper's
/// `expires_at < ?` filter is the same relation over the canonical text form.
pub fn is_expired(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> bool {
    now > expires_at
}

/// Latest instant the canonical form can hold, `9999-12-31T23:59:59.999Z`.
///
/// Past year 9999 the text gains a sign and a fifth year digit and stops
/// sorting with the rest.
pub const MAX_TIMESTAMP_MILLIS: i64 = 253_402_300_799_999;

// == Expiry For ==
/// Returns the expiration instant of a note created at `created_at`.
///
/// Fails when `created_at + ttl` overflows or lands beyond
/// [`MAX_TIMESTAMP_MILLIS`].
pub fn expiry_for(created_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    created_at
        .checked_add_signed(ttl)
        .filter(|ts| ts.timestamp_millis() <= MAX_TIMESTAMP_MILLIS)
        .ok_or_else(|| {
            NoteError::Internal(format!(
                "Note TTL of {}s from {} is out of timestamp range",
                ttl.num_seconds(),
                format_timestamp(&created_at)
            ))
        })
}

/// Largest TTL in whole seconds that keeps a note created at `now` inside the
/// canonical timestamp range.
pub fn max_ttl_secs(now: DateTime<Utc>) -> u64 {
    let remaining = MAX_TIMESTAMP_MILLIS.saturating_sub(now.timestamp_millis());
    u64::try_from(remaining / 1000).unwrap_or(0)
}

// == Now ==
/// Returns the current UTC time truncated to millisecond precision.
///
/// Stored timestamps carry milliseconds only, so every instant the service
/// mints is truncated first and survives a storage round trip unchanged.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// == Formatting ==
/// Formats a timestamp as fixed-width RFC 3339, e.g. `2024-05-01T12:00:00.000Z`.
///
/// Fixed width keeps lexicographic order equal to chronological order, which
/// the range delete on `expires_at` depends on.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored RFC 3339 timestamp back into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| NoteError::Internal(format!("Invalid stored timestamp '{}': {}", raw, e)))
}

/// Serde adapter writing timestamps in the canonical form.
pub mod serde_timestamp {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(ts))
    }
}
