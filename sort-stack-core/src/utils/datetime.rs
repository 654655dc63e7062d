//! Timestamp helpers for state records.
//!
//! State providers report `last_changed` / `last_updated` as RFC3339 strings, but older
//! integrations send bare Unix timestamps. Both are accepted on the way in and kept
//! verbatim; conversion to epoch milliseconds happens when a sort key is extracted.
//!
//! - Deserialization: string or Unix timestamp -> raw string
//! - Parsing: raw string -> epoch milliseconds, `0.0` when unparseable

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserializes an optional timestamp field, keeping its raw text.
///
/// Numbers are stored as their decimal representation and resolved later by
/// [`epoch_millis`].
pub fn deserialize_raw<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampOrString {
        String(String),
        I64(i64),
        U64(u64),
        F64(f64),
    }

    Ok(
        Option::<TimestampOrString>::deserialize(deserializer)?.map(|raw| match raw {
            TimestampOrString::String(s) => s,
            TimestampOrString::I64(ts) => ts.to_string(),
            TimestampOrString::U64(ts) => ts.to_string(),
            TimestampOrString::F64(ts) => ts.to_string(),
        }),
    )
}

/// Converts a raw timestamp to epoch milliseconds.
///
/// Accepts RFC3339, naive ISO-8601 date-times (read as UTC), bare dates (midnight UTC)
/// and Unix timestamps. Anything else yields `0.0` so the record sorts as earliest.
#[allow(clippy::cast_precision_loss)]
pub fn epoch_millis(raw: &str) -> f64 {
    parse(raw.trim()).map_or(0.0, |dt| dt.timestamp_millis() as f64)
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    // Try RFC3339 first.
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if let Ok(ts) = raw.parse::<i64>() {
        return parse_unix_timestamp(ts);
    }

    raw.parse::<f64>().ok().and_then(parse_fractional_timestamp)
}

/// Fractional Unix timestamp, same second/millisecond detection as integers.
#[allow(clippy::cast_possible_truncation)]
fn parse_fractional_timestamp(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let millis = if ts > 100_000_000_000.0 { ts } else { ts * 1000.0 }.round();
    if millis.abs() >= 9.0e18 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        // Otherwise treat the value as seconds.
        DateTime::from_timestamp(ts, 0)
    }
}
