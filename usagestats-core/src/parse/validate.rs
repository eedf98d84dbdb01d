use crate::types::LogEntry;
use chrono::DateTime;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidEntry {
    #[error("line does not match the access log pattern")]
    NoMatch,

    #[error("line has no readable date")]
    MissingTimestamp,

    #[error("line date {0} is not a positive timestamp")]
    NonPositiveTimestamp(i64),

    #[error("line date {0} is outside the representable calendar range")]
    OutOfRangeTimestamp(i64),
}

/// An entry is valid when the line matched and carries a positive timestamp.
pub fn validate_entry(entry: Option<&LogEntry>) -> Result<i64, InvalidEntry> {
    let entry = entry.ok_or(InvalidEntry::NoMatch)?;

    match entry.timestamp {
        None => Err(InvalidEntry::MissingTimestamp),
        Some(ts) if ts <= 0 => Err(InvalidEntry::NonPositiveTimestamp(ts)),
        Some(ts) if DateTime::from_timestamp(ts, 0).is_none() => Err(InvalidEntry::OutOfRangeTimestamp(ts)),
        Some(ts) => Ok(ts),
    }
}
