//! Domain types for the MARTA feeds.
//!
//! Every record type here is validated once, at construction, and is
//! immutable afterwards. Code that receives an [`ArrivalRecord`] or a
//! [`BusRecord`] can trust its timestamps and enumerations.

mod arrival;
mod bus;
mod direction;
mod error;
mod line;
mod station;
pub mod time;
mod waiting;

pub use arrival::{ArrivalField, ArrivalRecord};
pub use bus::{BusField, BusRecord};
pub use direction::Direction;
pub use error::RecordError;
pub use line::Line;
pub use station::StationName;
pub use waiting::WaitingStatus;
