use chrono::prelude::*;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("`{0}` is not a valid ISO-8601 timestamp")]
pub struct InvalidTimestampError(pub String);

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A timestamp as written by a client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamp {
    /// Carried an offset and names a single instant
    Absolute(DateTime<Utc>),
    /// No offset, a wall-clock time in the configured timezone
    Local(NaiveDateTime),
}

impl Timestamp {
    /// Parses an ISO-8601 timestamp. Plain dates become local midnight.
    pub fn parse(value: &str) -> Result<Self, InvalidTimestampError> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self::Absolute(dt.with_timezone(&Utc)));
        }

        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(Self::Local)
            .ok_or_else(|| InvalidTimestampError(value.to_string()))
    }
}

/// Resolves a wall-clock time in `tz`. Ambiguous times take the earlier
/// instant, times inside a DST gap do not exist and give `None`.
pub fn resolve_local(local: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses an ISO-8601 timestamp.
///
/// Timestamps carrying an offset are taken as they are. Timestamps without
/// an offset (e.g. `2024-01-15T10:00:00`) and plain dates are interpreted as
/// local time in `tz`.
pub fn parse_timestamp(value: &str, tz: &Tz) -> Result<DateTime<Utc>, InvalidTimestampError> {
    match Timestamp::parse(value)? {
        Timestamp::Absolute(dt) => Ok(dt),
        Timestamp::Local(local) => {
            resolve_local(&local, tz).ok_or_else(|| InvalidTimestampError(value.trim().to_string()))
        }
    }
}

/// Formats an occurrence the way it is shown to people, e.g. `2024-01-15 10:00`
pub fn format_occurrence(dt: &DateTime<Utc>, tz: &Tz) -> String {
    dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
