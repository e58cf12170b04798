//! Bus position snapshots and the typed bus filter.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use crate::domain::{BusField, BusRecord, RecordError};

use super::{BatchPolicy, FieldValue, Snapshot};

/// The buses returned by one bus fetch, in feed order.
pub type Buses = Snapshot<BusRecord>;

/// One exact-match condition on a bus field.
#[derive(Debug, Clone, PartialEq)]
pub enum BusCriterion {
    Adherence(i64),
    BlockId(String),
    BlockAbbr(String),
    Direction(String),
    Latitude(f64),
    Longitude(f64),
    MessageTime(NaiveDateTime),
    Route(String),
    StopId(String),
    Timepoint(String),
    TripId(String),
    Vehicle(String),
}

impl BusCriterion {
    /// The field this criterion tests.
    pub fn field(&self) -> BusField {
        match self {
            BusCriterion::Adherence(_) => BusField::Adherence,
            BusCriterion::BlockId(_) => BusField::BlockId,
            BusCriterion::BlockAbbr(_) => BusField::BlockAbbr,
            BusCriterion::Direction(_) => BusField::Direction,
            BusCriterion::Latitude(_) => BusField::Latitude,
            BusCriterion::Longitude(_) => BusField::Longitude,
            BusCriterion::MessageTime(_) => BusField::MessageTime,
            BusCriterion::Route(_) => BusField::Route,
            BusCriterion::StopId(_) => BusField::StopId,
            BusCriterion::Timepoint(_) => BusField::Timepoint,
            BusCriterion::TripId(_) => BusField::TripId,
            BusCriterion::Vehicle(_) => BusField::Vehicle,
        }
    }

    /// The value a matching bus must have.
    pub fn value(&self) -> FieldValue<'_> {
        match self {
            BusCriterion::Adherence(v) => (*v).into(),
            BusCriterion::Latitude(v) | BusCriterion::Longitude(v) => (*v).into(),
            BusCriterion::MessageTime(v) => (*v).into(),
            BusCriterion::BlockId(s)
            | BusCriterion::BlockAbbr(s)
            | BusCriterion::Direction(s)
            | BusCriterion::Route(s)
            | BusCriterion::StopId(s)
            | BusCriterion::Timepoint(s)
            | BusCriterion::TripId(s)
            | BusCriterion::Vehicle(s) => s.as_str().into(),
        }
    }
}

/// A conjunction of [`BusCriterion`]s, built one field at a time.
///
/// # Examples
///
/// ```
/// use marta_feeds::BusFilter;
///
/// let filter = BusFilter::new().route("110").direction("Westbound");
/// assert_eq!(filter.criteria().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusFilter {
    criteria: Vec<BusCriterion>,
}

impl BusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary criterion.
    pub fn with(mut self, criterion: BusCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn adherence(self, minutes: i64) -> Self {
        self.with(BusCriterion::Adherence(minutes))
    }

    pub fn block_id(self, block_id: impl Into<String>) -> Self {
        self.with(BusCriterion::BlockId(block_id.into()))
    }

    pub fn block_abbr(self, block_abbr: impl Into<String>) -> Self {
        self.with(BusCriterion::BlockAbbr(block_abbr.into()))
    }

    pub fn direction(self, direction: impl Into<String>) -> Self {
        self.with(BusCriterion::Direction(direction.into()))
    }

    pub fn latitude(self, latitude: f64) -> Self {
        self.with(BusCriterion::Latitude(latitude))
    }

    pub fn longitude(self, longitude: f64) -> Self {
        self.with(BusCriterion::Longitude(longitude))
    }

    pub fn message_time(self, at: NaiveDateTime) -> Self {
        self.with(BusCriterion::MessageTime(at))
    }

    pub fn route(self, route: impl Into<String>) -> Self {
        self.with(BusCriterion::Route(route.into()))
    }

    pub fn stop_id(self, stop_id: impl Into<String>) -> Self {
        self.with(BusCriterion::StopId(stop_id.into()))
    }

    pub fn timepoint(self, timepoint: impl Into<String>) -> Self {
        self.with(BusCriterion::Timepoint(timepoint.into()))
    }

    pub fn trip_id(self, trip_id: impl Into<String>) -> Self {
        self.with(BusCriterion::TripId(trip_id.into()))
    }

    pub fn vehicle(self, vehicle: impl Into<String>) -> Self {
        self.with(BusCriterion::Vehicle(vehicle.into()))
    }

    pub fn criteria(&self) -> &[BusCriterion] {
        &self.criteria
    }
}

impl Snapshot<BusRecord> {
    /// Build a bus snapshot from the raw feed array, keeping feed order.
    pub fn from_buses(values: &[Value], policy: BatchPolicy) -> Result<Self, RecordError> {
        let snapshot = Self::from_wire(values, policy)?;
        debug!(records = snapshot.len(), "built buses snapshot");
        Ok(snapshot)
    }

    /// Buses matching every criterion of `filter`.
    ///
    /// Criteria are applied in order, each narrowing the previous result. An
    /// empty filter returns a copy of the snapshot.
    pub fn filter(&self, filter: &BusFilter) -> Self {
        filter
            .criteria
            .iter()
            .fold(self.select(|_| true), |current, criterion| {
                current.filter_by(criterion.field(), criterion.value())
            })
    }
}
