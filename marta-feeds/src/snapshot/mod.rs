//! Snapshot collections.
//!
//! A [`Snapshot`] is the ordered set of records returned by one fetch. It owns
//! its records, and every filter or grouping produces new snapshots instead
//! of mutating the receiver. The engine is generic over the [`Record`] trait;
//! rail and bus conveniences live in [`arrivals`] and [`buses`].

pub mod arrivals;
pub mod buses;
mod notice;
mod record;

use std::collections::BTreeMap;
use std::ops::Index;

use serde_json::Value;
use tracing::warn;

use crate::domain::RecordError;

pub use arrivals::Arrivals;
pub use buses::{BusCriterion, BusFilter, Buses};
pub use notice::Notice;
pub use record::{FieldValue, Record};

/// What to do when one record in a batch fails to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Abort the whole batch on the first bad record.
    #[default]
    Strict,

    /// Drop bad records and report each one as a [`Notice::SkippedRecord`].
    SkipInvalid,
}

/// An ordered collection of records from one fetch.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    records: Vec<R>,
    notices: Vec<Notice>,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl<R: Record> Snapshot<R> {
    /// Wrap already-normalized records, keeping their order.
    pub(crate) fn from_records(records: Vec<R>) -> Self {
        Self {
            records,
            notices: Vec::new(),
        }
    }

    /// Normalize every element of a raw feed array.
    ///
    /// Under [`BatchPolicy::Strict`] the first failure is returned and no
    /// snapshot is built. Records keep feed order; the public constructors
    /// `from_arrivals` and `from_buses` add the per-kind rules on top.
    pub(crate) fn from_wire(values: &[Value], policy: BatchPolicy) -> Result<Self, RecordError> {
        let mut records = Vec::with_capacity(values.len());
        let mut notices = Vec::new();

        for (index, value) in values.iter().enumerate() {
            let parsed = match value {
                Value::Object(raw) => R::from_wire(raw),
                _ => Err(RecordError::NotAnObject { index }),
            };

            match parsed {
                Ok(record) => records.push(record),
                Err(error) => match policy {
                    BatchPolicy::Strict => return Err(error),
                    BatchPolicy::SkipInvalid => {
                        warn!(index, error = %error, "skipping invalid record");
                        notices.push(Notice::SkippedRecord { index, error });
                    }
                },
            }
        }

        Ok(Self { records, notices })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&R> {
        self.records.first()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Non-fatal signals raised while this snapshot was built.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Records whose `field` equals `value` exactly.
    ///
    /// Filtering twice by the same field and value is the same as filtering
    /// once.
    pub fn filter_by<'v>(&self, field: R::Field, value: impl Into<FieldValue<'v>>) -> Self {
        let value = value.into();
        self.select(|record| record.field(field) == value)
    }

    /// Records matching an arbitrary predicate, in order.
    pub fn select(&self, predicate: impl Fn(&R) -> bool) -> Self {
        Self::from_records(
            self.records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        )
    }

    /// Partition by the value of `field`.
    ///
    /// Buckets are ordered by key; records keep their snapshot order inside
    /// each bucket. Every record lands in exactly one bucket.
    pub fn group_by(&self, field: R::Field) -> BTreeMap<FieldValue<'static>, Self> {
        let mut groups: BTreeMap<FieldValue<'static>, Self> = BTreeMap::new();
        for record in &self.records {
            groups
                .entry(record.field(field).into_owned())
                .or_default()
                .records
                .push(record.clone());
        }
        groups
    }

    /// A copy sorted ascending by `field`. The sort is stable.
    pub fn sorted_by(&self, field: R::Field) -> Self {
        let mut sorted = self.clone();
        sorted.sort_in_place(field);
        sorted
    }

    fn sort_in_place(&mut self, field: R::Field) {
        self.records.sort_by(|a, b| a.field(field).cmp(&b.field(field)));
    }

    /// The wire objects of every record, in order.
    pub fn to_wire(&self) -> Vec<Value> {
        self.records
            .iter()
            .map(|record| Value::Object(record.to_wire()))
            .collect()
    }

    /// The snapshot as a wire JSON array string.
    pub fn to_json_string(&self) -> String {
        Value::Array(self.to_wire()).to_string()
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<R> Index<usize> for Snapshot<R> {
    type Output = R;

    fn index(&self, index: usize) -> &R {
        &self.records[index]
    }
}

impl<'a, R> IntoIterator for &'a Snapshot<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R> IntoIterator for Snapshot<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<R: PartialEq> PartialEq for Snapshot<R> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}
