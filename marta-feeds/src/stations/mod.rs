//! Rail station directory.
//!
//! Holds the canonical station names used to expand partial station queries
//! and to spot station names the feed has never sent before.

mod directory;
mod names;

pub use directory::StationDirectory;
pub use names::DEFAULT_STATIONS;
