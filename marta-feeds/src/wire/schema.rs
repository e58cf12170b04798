//! Record key-set validation.

use std::collections::BTreeSet;

use crate::domain::RecordError;

use super::RawRecord;

/// Keys of a rail arrival record, in alphabetical order.
pub const ARRIVAL_KEYS: [&str; 9] = [
    "DESTINATION",
    "DIRECTION",
    "EVENT_TIME",
    "LINE",
    "NEXT_ARR",
    "STATION",
    "TRAIN_ID",
    "WAITING_SECONDS",
    "WAITING_TIME",
];

/// Keys of a bus position record, in alphabetical order.
///
/// Bus records are not checked against this set; it defines the shape
/// written by [`super::bus_to_wire`].
pub const BUS_KEYS: [&str; 12] = [
    "ADHERENCE",
    "BLOCKID",
    "BLOCK_ABBR",
    "DIRECTION",
    "LATITUDE",
    "LONGITUDE",
    "MSGTIME",
    "ROUTE",
    "STOPID",
    "TIMEPOINT",
    "TRIPID",
    "VEHICLE",
];

/// Check that `raw` has exactly the `expected` keys.
///
/// Key order is irrelevant. On mismatch the error lists the expected set
/// alongside the unexpected and missing keys, each sorted.
///
/// # Examples
///
/// ```
/// use marta_feeds::wire::validate_keys;
/// use serde_json::json;
///
/// let raw = json!({"B": 1, "A": 2});
/// assert!(validate_keys(raw.as_object().unwrap(), &["A", "B"]).is_ok());
/// assert!(validate_keys(raw.as_object().unwrap(), &["A"]).is_err());
/// ```
pub fn validate_keys(raw: &RawRecord, expected: &[&str]) -> Result<(), RecordError> {
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();
    let actual_set: BTreeSet<&str> = raw.keys().map(String::as_str).collect();

    if expected_set == actual_set {
        return Ok(());
    }

    let unexpected = actual_set
        .difference(&expected_set)
        .map(|k| k.to_string())
        .collect();
    let missing = expected_set
        .difference(&actual_set)
        .map(|k| k.to_string())
        .collect();

    Err(RecordError::SchemaMismatch {
        expected: expected_set.iter().map(|k| k.to_string()).collect(),
        unexpected,
        missing,
    })
}
