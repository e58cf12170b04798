//! Client library for the MARTA real-time rail and bus feeds.
//!
//! The upstream API hands back loosely-typed JSON arrays. This crate turns one
//! such array into a [`snapshot::Snapshot`] of validated, immutable records
//! that can be filtered, grouped and re-serialized to the original wire shape.

pub mod domain;
pub mod feed;
pub mod snapshot;
pub mod stations;
pub mod wire;

#[cfg(test)]
mod fixtures;

pub use domain::{
    ArrivalField, ArrivalRecord, BusField, BusRecord, Direction, Line, RecordError, StationName,
    WaitingStatus,
};
pub use feed::{
    BusClient, BusConfig, ClientError, FetchJson, FixtureFetcher, HttpFetcher, RailClient, RailConfig,
};
pub use snapshot::{
    Arrivals, BatchPolicy, BusCriterion, BusFilter, Buses, FieldValue, Notice, Record, Snapshot,
};
pub use stations::StationDirectory;
