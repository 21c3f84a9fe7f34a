use std::fmt;
use std::str::FromStr;

use crate::core::RangeLabError;

/// A seat at a 6-max table.
///
/// Declaration order is preflop acting order. Postflop the blinds act
/// first, which is what [`POSTFLOP_ORDER`] captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Position {
    /// Under the gun, first to act preflop.
    UTG,
    /// Middle position.
    MP,
    /// Cutoff.
    CO,
    /// Button, last to act postflop.
    BTN,
    /// Small blind, first to act postflop.
    SB,
    /// Big blind.
    BB,
}

/// All positions in preflop acting order.
pub static PREFLOP_ORDER: [Position; 6] = [
    Position::UTG,
    Position::MP,
    Position::CO,
    Position::BTN,
    Position::SB,
    Position::BB,
];

/// All positions in postflop acting order: blinds first, button last.
pub static POSTFLOP_ORDER: [Position; 6] = [
    Position::SB,
    Position::BB,
    Position::UTG,
    Position::MP,
    Position::CO,
    Position::BTN,
];

impl Position {
    /// Index into [`PREFLOP_ORDER`].
    pub fn preflop_index(&self) -> usize {
        PREFLOP_ORDER.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Index into [`POSTFLOP_ORDER`].
    pub fn postflop_index(&self) -> usize {
        POSTFLOP_ORDER.iter().position(|p| p == self).unwrap_or(0)
    }

    /// True if this position acts before `other` postflop.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangelab::range::Position;
    ///
    /// assert!(Position::SB.is_oop_relative_to(Position::BB));
    /// assert!(!Position::BTN.is_oop_relative_to(Position::CO));
    /// ```
    pub fn is_oop_relative_to(&self, other: Position) -> bool {
        self.postflop_index() < other.postflop_index()
    }

    /// Positions that would be in position against this seat postflop.
    /// Empty for the button.
    pub fn valid_ip_positions(&self) -> &'static [Position] {
        &POSTFLOP_ORDER[self.postflop_index() + 1..]
    }

    /// Positions that would be out of position against this seat postflop.
    /// Empty for the small blind.
    pub fn valid_oop_positions(&self) -> &'static [Position] {
        &POSTFLOP_ORDER[..self.postflop_index()]
    }

    /// The seat's short name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UTG => "UTG",
            Self::MP => "MP",
            Self::CO => "CO",
            Self::BTN => "BTN",
            Self::SB => "SB",
            Self::BB => "BB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = RangeLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UTG" => Ok(Self::UTG),
            "MP" => Ok(Self::MP),
            "CO" => Ok(Self::CO),
            "BTN" => Ok(Self::BTN),
            "SB" => Ok(Self::SB),
            "BB" => Ok(Self::BB),
            _ => Err(RangeLabError::InvalidPosition(s.to_string())),
        }
    }
}
