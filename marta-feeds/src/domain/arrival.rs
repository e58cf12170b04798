//! Rail arrival records.

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::snapshot::{FieldValue, Record};
use crate::wire::{RawRecord, arrival_from_wire, arrival_to_wire};

use super::{Direction, Line, StationName, WaitingStatus};

/// Selector for one field of an [`ArrivalRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrivalField {
    Station,
    Line,
    Destination,
    Direction,
    NextArrival,
    WaitingTime,
    WaitingSeconds,
    EventTime,
    TrainId,
}

impl ArrivalField {
    /// All fields, in wire-key order.
    pub const ALL: [ArrivalField; 9] = [
        ArrivalField::Destination,
        ArrivalField::Direction,
        ArrivalField::EventTime,
        ArrivalField::Line,
        ArrivalField::NextArrival,
        ArrivalField::Station,
        ArrivalField::TrainId,
        ArrivalField::WaitingSeconds,
        ArrivalField::WaitingTime,
    ];

    /// The upper-case key this field uses on the wire.
    pub fn wire_key(self) -> &'static str {
        match self {
            ArrivalField::Station => "STATION",
            ArrivalField::Line => "LINE",
            ArrivalField::Destination => "DESTINATION",
            ArrivalField::Direction => "DIRECTION",
            ArrivalField::NextArrival => "NEXT_ARR",
            ArrivalField::WaitingTime => "WAITING_TIME",
            ArrivalField::WaitingSeconds => "WAITING_SECONDS",
            ArrivalField::EventTime => "EVENT_TIME",
            ArrivalField::TrainId => "TRAIN_ID",
        }
    }
}

/// One real-time train event at a station.
///
/// Built only through [`ArrivalRecord::from_wire`] (or deserialization), which
/// validates the key set, parses both timestamps and the direction, and
/// upper-cases the station name. The record is immutable afterwards.
///
/// # Wire fidelity
///
/// A record built from the feed keeps the object it was built from, and
/// [`to_wire`](Self::to_wire) returns that object verbatim. The computed form
/// ([`to_computed_wire`](Self::to_computed_wire)) must describe the same
/// record: normalizing either yields equal records. Equality deliberately
/// ignores the stored payload for this reason.
#[derive(Debug, Clone)]
pub struct ArrivalRecord {
    pub(crate) station: StationName,
    pub(crate) line: Line,
    pub(crate) destination: String,
    pub(crate) direction: Direction,
    pub(crate) next_arrival: NaiveTime,
    pub(crate) waiting_time: WaitingStatus,
    pub(crate) waiting_seconds: i64,
    pub(crate) event_time: NaiveDateTime,
    pub(crate) train_id: String,
    pub(crate) payload: Option<RawRecord>,
}

impl ArrivalRecord {
    /// Validate and normalize one raw arrival object.
    ///
    /// # Examples
    ///
    /// ```
    /// use marta_feeds::{ArrivalRecord, Direction};
    /// use serde_json::json;
    ///
    /// let raw = json!({
    ///     "DESTINATION": "North Springs",
    ///     "DIRECTION": "N",
    ///     "EVENT_TIME": "12/31/2017 4:09:10 PM",
    ///     "LINE": "RED",
    ///     "NEXT_ARR": "04:12:10 PM",
    ///     "STATION": "NORTH SPRINGS STATION",
    ///     "TRAIN_ID": "104026",
    ///     "WAITING_SECONDS": "-45",
    ///     "WAITING_TIME": "Boarding"
    /// });
    /// let arrival = ArrivalRecord::from_wire(raw.as_object().unwrap()).unwrap();
    /// assert_eq!(arrival.direction(), Direction::North);
    /// assert_eq!(arrival.to_wire(), *raw.as_object().unwrap());
    /// ```
    pub fn from_wire(raw: &RawRecord) -> Result<Self, super::RecordError> {
        arrival_from_wire(raw)
    }

    /// Canonical upper-case station name.
    pub fn station(&self) -> &StationName {
        &self.station
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Destination area, e.g. `"North Springs"`. Not a station name.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Scheduled time of the next arrival at [`station`](Self::station).
    pub fn next_arrival(&self) -> NaiveTime {
        self.next_arrival
    }

    pub fn waiting_time(&self) -> &WaitingStatus {
        &self.waiting_time
    }

    /// Seconds until arrival; negative once the train is in the station.
    pub fn waiting_seconds(&self) -> i64 {
        self.waiting_seconds
    }

    /// When the feed recorded this event. Not the time of the API call.
    pub fn event_time(&self) -> NaiveDateTime {
        self.event_time
    }

    pub fn train_id(&self) -> &str {
        &self.train_id
    }

    /// The wire object for this record: the stored payload if there is one,
    /// otherwise the computed form.
    pub fn to_wire(&self) -> RawRecord {
        match &self.payload {
            Some(raw) => raw.clone(),
            None => self.to_computed_wire(),
        }
    }

    /// The wire object computed from the typed fields, ignoring any payload.
    pub fn to_computed_wire(&self) -> RawRecord {
        arrival_to_wire(self)
    }

    /// Canonical wire JSON string.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_wire()).to_string()
    }

    /// A copy of this record without its stored payload.
    pub fn without_payload(&self) -> Self {
        Self {
            payload: None,
            ..self.clone()
        }
    }
}

impl PartialEq for ArrivalRecord {
    fn eq(&self, other: &Self) -> bool {
        self.station == other.station
            && self.line == other.line
            && self.destination == other.destination
            && self.direction == other.direction
            && self.next_arrival == other.next_arrival
            && self.waiting_time == other.waiting_time
            && self.waiting_seconds == other.waiting_seconds
            && self.event_time == other.event_time
            && self.train_id == other.train_id
    }
}

impl Eq for ArrivalRecord {}

impl Record for ArrivalRecord {
    type Field = ArrivalField;

    fn from_wire(raw: &RawRecord) -> Result<Self, super::RecordError> {
        arrival_from_wire(raw)
    }

    fn to_wire(&self) -> RawRecord {
        ArrivalRecord::to_wire(self)
    }

    fn field(&self, field: ArrivalField) -> FieldValue<'_> {
        match field {
            ArrivalField::Station => self.station.as_str().into(),
            ArrivalField::Line => self.line.as_str().into(),
            ArrivalField::Destination => self.destination.as_str().into(),
            ArrivalField::Direction => self.direction.as_str().into(),
            ArrivalField::NextArrival => self.next_arrival.into(),
            ArrivalField::WaitingTime => FieldValue::Text(self.waiting_time.as_wire()),
            ArrivalField::WaitingSeconds => self.waiting_seconds.into(),
            ArrivalField::EventTime => self.event_time.into(),
            ArrivalField::TrainId => FieldValue::Text(Cow::Borrowed(&self.train_id)),
        }
    }
}

/// Renders the canonical wire JSON string.
impl fmt::Display for ArrivalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl Serialize for ArrivalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArrivalRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRecord::deserialize(deserializer)?;
        arrival_from_wire(&raw).map_err(D::Error::custom)
    }
}
