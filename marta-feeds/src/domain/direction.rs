//! Rail direction of travel.

use std::fmt;

use super::RecordError;

/// Direction of travel for a rail arrival.
///
/// The feed only ever sends one of four cardinal letters. Anything else is a
/// hard error rather than a silent default.
///
/// # Examples
///
/// ```
/// use marta_feeds::Direction;
///
/// assert_eq!(Direction::parse("n").unwrap(), Direction::North);
/// assert_eq!(Direction::North.as_str(), "N");
/// assert!(Direction::parse("X").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    West,
    South,
}

impl Direction {
    /// Accepted wire letters, in the order the feed documents them.
    pub const ACCEPTED: &'static [&'static str] = &["N", "E", "W", "S"];

    /// Parse a direction letter, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        match s.to_ascii_uppercase().as_str() {
            "N" => Ok(Direction::North),
            "E" => Ok(Direction::East),
            "W" => Ok(Direction::West),
            "S" => Ok(Direction::South),
            _ => Err(RecordError::InvalidEnum {
                field: "DIRECTION",
                value: s.to_string(),
                accepted: Self::ACCEPTED,
            }),
        }
    }

    /// Returns the upper-case wire letter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::West => "W",
            Direction::South => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
