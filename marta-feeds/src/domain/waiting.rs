//! Waiting-status indicator for rail arrivals.

use std::borrow::Cow;
use std::fmt;

/// How close a train is to the station.
///
/// The feed sends `"Boarding"`, `"Arriving"`, `"Arrived"`, or a countdown
/// like `"3 min"`. Other strings are kept verbatim in [`WaitingStatus::Other`]
/// so that a record always re-serializes to what was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaitingStatus {
    Boarding,
    Arriving,
    Arrived,
    Minutes(u32),
    Other(String),
}

impl WaitingStatus {
    /// Parse a wire status string. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use marta_feeds::WaitingStatus;
    ///
    /// assert_eq!(WaitingStatus::from_wire("Boarding"), WaitingStatus::Boarding);
    /// assert_eq!(WaitingStatus::from_wire("7 min"), WaitingStatus::Minutes(7));
    /// assert_eq!(WaitingStatus::from_wire("Delayed").as_wire(), "Delayed");
    /// ```
    pub fn from_wire(s: &str) -> Self {
        match s {
            "Boarding" => WaitingStatus::Boarding,
            "Arriving" => WaitingStatus::Arriving,
            "Arrived" => WaitingStatus::Arrived,
            other => parse_countdown(other).unwrap_or_else(|| WaitingStatus::Other(other.to_string())),
        }
    }

    /// Returns the wire form of this status.
    pub fn as_wire(&self) -> Cow<'_, str> {
        match self {
            WaitingStatus::Boarding => Cow::Borrowed("Boarding"),
            WaitingStatus::Arriving => Cow::Borrowed("Arriving"),
            WaitingStatus::Arrived => Cow::Borrowed("Arrived"),
            WaitingStatus::Minutes(n) => Cow::Owned(format!("{n} min")),
            WaitingStatus::Other(s) => Cow::Borrowed(s),
        }
    }
}

/// Accept `"<n> min"` only when it formats back to the same string.
fn parse_countdown(s: &str) -> Option<WaitingStatus> {
    let digits = s.strip_suffix(" min")?;
    let minutes: u32 = digits.parse().ok()?;
    (minutes.to_string() == digits).then_some(WaitingStatus::Minutes(minutes))
}

impl fmt::Display for WaitingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_wire())
    }
}
