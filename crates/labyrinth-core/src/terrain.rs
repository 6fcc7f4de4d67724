//! Terrain codes attached to every grid cell.

use std::fmt;
use std::str::FromStr;

/// What occupies a grid cell.
///
/// Decided once when a grid is built; the search never re-reads raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Start,
    End,
    Free,
    Obstacle,
    /// Heavy terrain multiplying the cost of entering the cell (2..=9).
    Weight(u8),
}

impl Terrain {
    /// Smallest weight a [`Terrain::Weight`] may carry.
    pub const MIN_WEIGHT: u8 = 2;
    /// Largest weight a [`Terrain::Weight`] may carry.
    pub const MAX_WEIGHT: u8 = 9;

    /// Parse a single terrain token.
    ///
    /// Recognized: `S`, `E` (either case), `0`, `1`, `#` and `2`..`9`.
    pub fn from_code(code: &str) -> Result<Self, ParseError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch),
            _ => Err(ParseError::UnknownCode(code.to_string())),
        }
    }

    /// Parse a single-character terrain code.
    pub fn from_char(ch: char) -> Result<Self, ParseError> {
        match ch {
            'S' | 's' => Ok(Self::Start),
            'E' | 'e' => Ok(Self::End),
            '0' => Ok(Self::Free),
            '1' | '#' => Ok(Self::Obstacle),
            '2'..='9' => Ok(Self::Weight(ch as u8 - b'0')),
            _ => Err(ParseError::UnknownCode(ch.to_string())),
        }
    }

    /// Canonical single-character code. Obstacles render as `#`.
    pub fn code(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Free => '0',
            Self::Obstacle => '#',
            Self::Weight(n) => char::from(b'0' + n),
        }
    }

    /// Multiplier applied to a step entering this cell, or `None` if the
    /// cell cannot be entered.
    #[inline]
    pub fn weight(self) -> Option<u32> {
        match self {
            Self::Obstacle => None,
            Self::Weight(n) => Some(u32::from(n)),
            Self::Start | Self::End | Self::Free => Some(1),
        }
    }

    /// Whether a path may pass through this cell.
    #[inline]
    pub fn is_passable(self) -> bool {
        self != Self::Obstacle
    }
}

impl FromStr for Terrain {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while reading terrain codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token is not a recognized terrain code.
    UnknownCode(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode(code) => write!(
                f,
                "unknown terrain code \u{201c}{code}\u{201d} (expected S, E, 0, 1, # or 2..9)"
            ),
        }
    }
}

impl std::error::Error for ParseError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn terrain_round_trip() {
        for t in [Terrain::Start, Terrain::Obstacle, Terrain::Weight(4)] {
            let json = serde_json::to_string(&t).unwrap();
            let back: Terrain = serde_json::from_str(&json).unwrap();
            assert_eq!(t, back);
        }
    }
}
