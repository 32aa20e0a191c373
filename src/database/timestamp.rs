//! Canonical TEXT encoding for timestamps stored in SQLite.
//!
//! Every timestamp column holds UTC with millisecond precision and a trailing
//! `Z`, e.g. `2026-10-16T08:30:00.000Z`. Because the width is fixed, string
//! comparison in SQL orders the same way as the instants do.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

pub fn encode<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    at.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Rows written by hand (seed scripts, sqlite3 shell) often lack an offset.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
