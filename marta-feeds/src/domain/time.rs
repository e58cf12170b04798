//! Wire timestamp handling.
//!
//! MARTA sends two kinds of timestamps, both in US 12-hour notation:
//!
//! - the next-arrival time of day, e.g. `"04:12:10 PM"`
//! - full event timestamps, e.g. `"12/31/2017 4:09:10 PM"`
//!
//! Parsing and formatting share one pattern per kind so that a parsed value
//! re-formats to a string that parses back to the same value.

use chrono::{NaiveDateTime, NaiveTime};

use super::RecordError;

/// Pattern for the rail `NEXT_ARR` time of day.
pub const ARRIVAL_TIME_FORMAT: &str = "%I:%M:%S %p";

/// Pattern for rail `EVENT_TIME` and bus `MSGTIME` timestamps.
pub const EVENT_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Parse a time of day in [`ARRIVAL_TIME_FORMAT`].
///
/// Single-digit hours are accepted (`"4:12:10 PM"`).
///
/// # Examples
///
/// ```
/// use marta_feeds::domain::time::parse_arrival_time;
///
/// let t = parse_arrival_time("NEXT_ARR", "04:12:10 PM").unwrap();
/// assert_eq!(t.to_string(), "16:12:10");
///
/// assert!(parse_arrival_time("NEXT_ARR", "16:12").is_err());
/// ```
pub fn parse_arrival_time(field: &'static str, raw: &str) -> Result<NaiveTime, RecordError> {
    NaiveTime::parse_from_str(raw, ARRIVAL_TIME_FORMAT).map_err(|_| {
        RecordError::InvalidTimestamp {
            field,
            value: raw.to_string(),
            pattern: ARRIVAL_TIME_FORMAT,
        }
    })
}

/// Parse a full timestamp in [`EVENT_TIME_FORMAT`].
pub fn parse_event_time(field: &'static str, raw: &str) -> Result<NaiveDateTime, RecordError> {
    NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT).map_err(|_| {
        RecordError::InvalidTimestamp {
            field,
            value: raw.to_string(),
            pattern: EVENT_TIME_FORMAT,
        }
    })
}

/// Format a time of day with [`ARRIVAL_TIME_FORMAT`].
pub fn format_arrival_time(time: NaiveTime) -> String {
    time.format(ARRIVAL_TIME_FORMAT).to_string()
}

/// Format a timestamp with [`EVENT_TIME_FORMAT`].
pub fn format_event_time(timestamp: NaiveDateTime) -> String {
    timestamp.format(EVENT_TIME_FORMAT).to_string()
}
