//! Shared timestamp/event helpers for deterministic record envelopes.

use chrono::{DateTime, SecondsFormat, Utc};
use ulid::Ulid;

/// Returns the current instant as an RFC 3339 UTC timestamp
/// (e.g. `2026-08-29T06:15:00Z`).
pub fn now_rfc3339() -> String {
    to_rfc3339(Utc::now())
}

pub fn to_rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Returns the UTC calendar-day stamp used to key per-day log files
/// (e.g. `20260829`).
pub fn day_stamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%d").to_string()
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}
