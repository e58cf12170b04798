//! Record-level error types.
//!
//! These errors describe a single malformed wire record. They are distinct
//! from transport errors, which live in [`crate::feed::ClientError`].

/// Errors raised while validating or normalizing one wire record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A timestamp field did not match its wire pattern
    #[error("invalid timestamp in {field}: {value:?} (expected pattern {pattern:?})")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        pattern: &'static str,
    },

    /// An enumerated field held a value outside its accepted set
    #[error("invalid {field}: {value:?} (accepted: {})", .accepted.join(","))]
    InvalidEnum {
        field: &'static str,
        value: String,
        accepted: &'static [&'static str],
    },

    /// The record's key set differs from the expected schema
    #[error(
        "unexpected record keys (expected: {}; unexpected: [{}]; missing: [{}])",
        .expected.join(","),
        .unexpected.join(","),
        .missing.join(",")
    )]
    SchemaMismatch {
        expected: Vec<String>,
        unexpected: Vec<String>,
        missing: Vec<String>,
    },

    /// A required field was absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field had the wrong JSON type or an unparseable value
    #[error("invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// An element of the feed array was not a JSON object
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}
