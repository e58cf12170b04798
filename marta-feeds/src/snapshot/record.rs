//! The record abstraction shared by rail and bus snapshots.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

use crate::domain::RecordError;
use crate::domain::time::{format_arrival_time, format_event_time};
use crate::wire::RawRecord;

/// A typed feed record that a [`super::Snapshot`] can hold.
///
/// Implementors name their fields with a small `Copy` enum so that filters
/// and groupings are checked at compile time instead of looked up by string.
pub trait Record: Clone {
    /// Field selector for this record kind.
    type Field: Copy + fmt::Debug;

    /// Validate and normalize one raw wire object.
    fn from_wire(raw: &RawRecord) -> Result<Self, RecordError>;

    /// The wire object for this record.
    fn to_wire(&self) -> RawRecord;

    /// Typed value of one field.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

/// The value of one record field, used for filtering and grouping.
///
/// Values are totally ordered: first by kind, then by value. Floats compare
/// with [`f64::total_cmp`], so equality on coordinates is exact bit-level
/// equality (apart from the sign of zero).
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Null,
    Integer(i64),
    Float(f64),
    Text(Cow<'a, str>),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl FieldValue<'_> {
    /// Detach from the borrowed record.
    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Null => FieldValue::Null,
            FieldValue::Integer(v) => FieldValue::Integer(v),
            FieldValue::Float(v) => FieldValue::Float(v),
            FieldValue::Text(v) => FieldValue::Text(Cow::Owned(v.into_owned())),
            FieldValue::Time(v) => FieldValue::Time(v),
            FieldValue::Timestamp(v) => FieldValue::Timestamp(v),
        }
    }

    /// Returns the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Integer(_) => 1,
            FieldValue::Float(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Time(_) => 4,
            FieldValue::Timestamp(_) => 5,
        }
    }
}

impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => {
                if a == b {
                    Ordering::Equal
                } else {
                    a.total_cmp(b)
                }
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue<'_> {}

/// Renders the value the way it appears on the wire.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Time(v) => f.write_str(&format_arrival_time(*v)),
            FieldValue::Timestamp(v) => f.write_str(&format_event_time(*v)),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(v))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(v: String) -> Self {
        FieldValue::Text(Cow::Owned(v))
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<NaiveTime> for FieldValue<'_> {
    fn from(v: NaiveTime) -> Self {
        FieldValue::Time(v)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
