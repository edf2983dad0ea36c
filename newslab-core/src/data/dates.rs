//! Timestamp normalization for news date strings.
//!
//! Raw feeds mix several ISO-8601-ish shapes: date-only, naive datetimes,
//! and datetimes carrying a UTC offset. Normalization keeps the wall-clock
//! reading and strips the offset rather than converting to UTC, so an
//! article stamped `2020-06-05 23:30:00-04:00` lands on `2020-06-05`.
//! Anything unparseable maps to `None`; nothing here panics.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive datetime formats tried after the offset-bearing shapes.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing formats for space-separated timestamps (the T-separated
/// variants go through the RFC 3339 parser first).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Parses a raw date string into a naive wall-clock timestamp.
///
/// Date-only strings land on midnight of that day. Returns `None` for
/// anything that fails every known format.
pub fn normalize_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// Calendar-day key for grouping and joining.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    normalize_timestamp(raw).map(|dt| dt.date())
}
