//! Bus position records.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::snapshot::{FieldValue, Record};
use crate::wire::{RawRecord, bus_from_wire, bus_to_wire};

use super::RecordError;

/// Selector for one field of a [`BusRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusField {
    Adherence,
    BlockId,
    BlockAbbr,
    Direction,
    Latitude,
    Longitude,
    MessageTime,
    Route,
    StopId,
    Timepoint,
    TripId,
    Vehicle,
}

impl BusField {
    /// The upper-case key this field uses on the wire.
    pub fn wire_key(self) -> &'static str {
        match self {
            BusField::Adherence => "ADHERENCE",
            BusField::BlockId => "BLOCKID",
            BusField::BlockAbbr => "BLOCK_ABBR",
            BusField::Direction => "DIRECTION",
            BusField::Latitude => "LATITUDE",
            BusField::Longitude => "LONGITUDE",
            BusField::MessageTime => "MSGTIME",
            BusField::Route => "ROUTE",
            BusField::StopId => "STOPID",
            BusField::Timepoint => "TIMEPOINT",
            BusField::TripId => "TRIPID",
            BusField::Vehicle => "VEHICLE",
        }
    }
}

/// One live bus position.
///
/// Unlike rail arrivals, bus objects are not checked against a key set and
/// the direction is free text (`"Northbound"`, `"Westbound"`, ...). An empty
/// or absent `MSGTIME` yields `None` rather than an error.
///
/// Equality ignores the stored payload, as for
/// [`ArrivalRecord`](super::ArrivalRecord).
#[derive(Debug, Clone)]
pub struct BusRecord {
    pub(crate) adherence: Option<i64>,
    pub(crate) block_id: String,
    pub(crate) block_abbr: String,
    pub(crate) direction: String,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) message_time: Option<NaiveDateTime>,
    pub(crate) route: String,
    pub(crate) stop_id: String,
    pub(crate) timepoint: String,
    pub(crate) trip_id: String,
    pub(crate) vehicle: String,
    pub(crate) payload: Option<RawRecord>,
}

impl BusRecord {
    /// Normalize one raw bus object.
    pub fn from_wire(raw: &RawRecord) -> Result<Self, RecordError> {
        bus_from_wire(raw)
    }

    /// Schedule adherence in minutes, as reported by the vehicle.
    pub fn adherence(&self) -> Option<i64> {
        self.adherence
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    pub fn block_abbr(&self) -> &str {
        &self.block_abbr
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// When the vehicle last reported its position.
    pub fn message_time(&self) -> Option<NaiveDateTime> {
        self.message_time
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn timepoint(&self) -> &str {
        &self.timepoint
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    /// The stored payload if there is one, otherwise the computed form.
    pub fn to_wire(&self) -> RawRecord {
        match &self.payload {
            Some(raw) => raw.clone(),
            None => self.to_computed_wire(),
        }
    }

    /// The wire object computed from the typed fields.
    pub fn to_computed_wire(&self) -> RawRecord {
        bus_to_wire(self)
    }

    /// Canonical wire JSON string.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_wire()).to_string()
    }
}

impl PartialEq for BusRecord {
    fn eq(&self, other: &Self) -> bool {
        self.adherence == other.adherence
            && self.block_id == other.block_id
            && self.block_abbr == other.block_abbr
            && self.direction == other.direction
            && self.latitude == other.latitude
            && self.longitude == other.longitude
            && self.message_time == other.message_time
            && self.route == other.route
            && self.stop_id == other.stop_id
            && self.timepoint == other.timepoint
            && self.trip_id == other.trip_id
            && self.vehicle == other.vehicle
    }
}

impl Record for BusRecord {
    type Field = BusField;

    fn from_wire(raw: &RawRecord) -> Result<Self, RecordError> {
        bus_from_wire(raw)
    }

    fn to_wire(&self) -> RawRecord {
        BusRecord::to_wire(self)
    }

    fn field(&self, field: BusField) -> FieldValue<'_> {
        match field {
            BusField::Adherence => self.adherence.into(),
            BusField::BlockId => self.block_id.as_str().into(),
            BusField::BlockAbbr => self.block_abbr.as_str().into(),
            BusField::Direction => self.direction.as_str().into(),
            BusField::Latitude => self.latitude.into(),
            BusField::Longitude => self.longitude.into(),
            BusField::MessageTime => self.message_time.into(),
            BusField::Route => self.route.as_str().into(),
            BusField::StopId => self.stop_id.as_str().into(),
            BusField::Timepoint => self.timepoint.as_str().into(),
            BusField::TripId => self.trip_id.as_str().into(),
            BusField::Vehicle => self.vehicle.as_str().into(),
        }
    }
}

impl fmt::Display for BusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl Serialize for BusRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BusRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRecord::deserialize(deserializer)?;
        bus_from_wire(&raw).map_err(D::Error::custom)
    }
}
