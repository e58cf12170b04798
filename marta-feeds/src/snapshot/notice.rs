//! Non-fatal signals raised while building a snapshot.

use crate::domain::{RecordError, StationName};

/// Something worth reporting that did not stop the query.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The feed sent a station the directory did not know; it was added.
    NewStation(StationName),

    /// A partial station name matched no known station.
    UnresolvedStation(String),

    /// A malformed record was dropped under [`super::BatchPolicy::SkipInvalid`].
    SkippedRecord { index: usize, error: RecordError },
}
