use chrono::{DateTime, NaiveDateTime};

const COMBINED_DATE_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";
const OFFSET_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses the date field of a log line into seconds since the epoch.
///
/// Accepted forms, tried in order: a bare integer epoch, the combined log
/// format (`10/Oct/2000:13:55:36 -0700`), RFC 3339, `YYYY-MM-DD HH:MM:SS ±zzzz`
/// and `YYYY-MM-DD HH:MM:SS` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(epoch) = raw.parse::<i64>() {
        return Some(epoch);
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, COMBINED_DATE_FORMAT) {
        return Some(dt.timestamp());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, OFFSET_DATE_FORMAT) {
        return Some(dt.timestamp());
    }

    NaiveDateTime::parse_from_str(raw, NAIVE_DATE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

/// Calendar day (UTC) of a timestamp as `YYYYMMDD`.
pub fn day_of(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y%m%d").to_string())
}
