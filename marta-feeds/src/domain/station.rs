//! Canonical station names.

use std::fmt;

/// An upper-case rail station name, e.g. `"PEACHTREE CENTER STATION"`.
///
/// Names are upper-cased on construction so that equality and substring
/// matching are case-insensitive with respect to the input.
///
/// # Examples
///
/// ```
/// use marta_feeds::domain::StationName;
///
/// let name = StationName::new("Five Points Station");
/// assert_eq!(name.as_str(), "FIVE POINTS STATION");
/// assert!(name.contains_fragment("points"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Create a canonical name from any casing.
    pub fn new(name: impl AsRef<str>) -> Self {
        StationName(name.as_ref().to_uppercase())
    }

    /// Returns the canonical name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test.
    pub fn contains_fragment(&self, fragment: &str) -> bool {
        self.0.contains(&fragment.to_uppercase())
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
