//! Rail line colours.

use std::fmt;

/// A rail service line.
///
/// The four known colours get their own variants so callers can match on
/// them. The feed's `LINE` value is not validated: anything else is carried
/// through untouched in [`Line::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Red,
    Green,
    Blue,
    Gold,
    Other(String),
}

impl Line {
    /// The four lines currently in service.
    pub const KNOWN: [Line; 4] = [Line::Red, Line::Green, Line::Blue, Line::Gold];

    /// Map a wire value onto a line, passing unknown values through.
    ///
    /// # Examples
    ///
    /// ```
    /// use marta_feeds::Line;
    ///
    /// assert_eq!(Line::from_wire("GOLD"), Line::Gold);
    /// assert_eq!(Line::from_wire("SILVER"), Line::Other("SILVER".into()));
    /// assert_eq!(Line::from_wire("SILVER").as_str(), "SILVER");
    /// ```
    pub fn from_wire(s: &str) -> Self {
        match s {
            "RED" => Line::Red,
            "GREEN" => Line::Green,
            "BLUE" => Line::Blue,
            "GOLD" => Line::Gold,
            other => Line::Other(other.to_string()),
        }
    }

    /// Returns the wire form of this line.
    pub fn as_str(&self) -> &str {
        match self {
            Line::Red => "RED",
            Line::Green => "GREEN",
            Line::Blue => "BLUE",
            Line::Gold => "GOLD",
            Line::Other(s) => s,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
