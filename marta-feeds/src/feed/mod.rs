//! Clients for the real-time rail and bus feeds.
//!
//! The upstream API serves both feeds as a top-level JSON array of flat
//! objects with upper-case keys. Fetching is behind the [`FetchJson`] trait so
//! that [`FixtureFetcher`] can stand in for the network.

mod client;
mod error;
mod fetch;
mod mock;

pub use client::{BusClient, BusConfig, RailClient, RailConfig};
pub use error::ClientError;
pub use fetch::{FetchJson, HttpFetcher};
pub use mock::FixtureFetcher;
