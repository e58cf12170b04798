//! MARTA wire format.
//!
//! Raw feed records are plain JSON objects with upper-case, underscore-separated
//! keys. This module holds the expected key sets, the key-set validator, and
//! the conversions between raw objects and domain records.

mod convert;
mod schema;

pub use convert::{
    arrival_from_wire, arrival_to_wire, bus_from_wire, bus_to_wire, RawRecord,
};
pub use schema::{ARRIVAL_KEYS, BUS_KEYS, validate_keys};
