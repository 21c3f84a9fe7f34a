use std::fmt;
use std::str::FromStr;

use crate::core::RangeLabError;
use crate::range::position::{Position, PREFLOP_ORDER};

/// The preflop spot a chart describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Scenario {
    /// Raise first in: everyone before the hero folded.
    Rfi,
    /// Facing an open raise from the villain.
    VsOpen,
    /// The hero opened and now faces a 3-bet from the villain.
    Vs3Bet,
    /// The hero 3-bet and now faces a 4-bet from the villain.
    Vs4Bet,
    /// The hero opened, got 3-bet, and defends by calling or 4-betting.
    ThreeBetDefense,
}

impl Scenario {
    /// The scenario's canonical name, as used in chart keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfi => "RFI",
            Self::VsOpen => "vs-open",
            Self::Vs3Bet => "vs-3bet",
            Self::Vs4Bet => "vs-4bet",
            Self::ThreeBetDefense => "3bet-defense",
        }
    }

    /// Whether a chart for this scenario names a specific villain.
    /// Only RFI is villain-free.
    pub fn requires_villain(&self) -> bool {
        !matches!(self, Self::Rfi)
    }

    /// The scenario whose aggressive portion this range descends from,
    /// if any.
    ///
    /// A hero facing a 3-bet got there by opening, so a vs-3bet range
    /// inherits from the RFI range. A hero facing a 4-bet got there by
    /// 3-betting, so it inherits from the vs-open range, as does the
    /// 3-bet-defense range.
    pub fn parent(&self) -> Option<Scenario> {
        match self {
            Self::Vs3Bet => Some(Self::Rfi),
            Self::Vs4Bet | Self::ThreeBetDefense => Some(Self::VsOpen),
            Self::Rfi | Self::VsOpen => None,
        }
    }

    /// The villains that can occur in this scenario for a given hero seat.
    ///
    /// Openers sit before a hero who is facing an open; 3-bettors sit after
    /// the hero who opened; 4-bettors sit before the hero who 3-bet.
    pub fn valid_villains(&self, hero: Position) -> &'static [Position] {
        let idx = hero.preflop_index();
        match self {
            Self::Rfi => &[],
            Self::VsOpen => &PREFLOP_ORDER[..idx],
            Self::Vs3Bet => &PREFLOP_ORDER[idx + 1..],
            Self::Vs4Bet | Self::ThreeBetDefense => &PREFLOP_ORDER[..idx],
        }
    }

    /// The scenarios that make sense for a seat.
    ///
    /// The big blind never raises first in (the pot already has its blind
    /// and everyone folded means a walk), UTG never faces an open, and the
    /// big blind never faces a 3-bet of its own open.
    pub fn valid_scenarios(position: Position) -> Vec<Scenario> {
        let idx = position.preflop_index();
        let mut scenarios = Vec::new();
        if position != Position::BB {
            scenarios.push(Self::Rfi);
        }
        if idx > 0 {
            scenarios.push(Self::VsOpen);
        }
        if idx < PREFLOP_ORDER.len() - 1 {
            scenarios.push(Self::Vs3Bet);
        }
        if idx > 0 {
            scenarios.push(Self::Vs4Bet);
            scenarios.push(Self::ThreeBetDefense);
        }
        scenarios
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = RangeLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rfi" => Ok(Self::Rfi),
            "vs-open" => Ok(Self::VsOpen),
            "vs-3bet" => Ok(Self::Vs3Bet),
            "vs-4bet" => Ok(Self::Vs4Bet),
            "3bet-defense" => Ok(Self::ThreeBetDefense),
            _ => Err(RangeLabError::InvalidScenario(s.to_string())),
        }
    }
}

impl TryFrom<String> for Scenario {
    type Error = RangeLabError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scenario> for String {
    fn from(scenario: Scenario) -> Self {
        scenario.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chain() {
        assert_eq!(Scenario::Rfi.parent(), None);
        assert_eq!(Scenario::VsOpen.parent(), None);
        assert_eq!(Scenario::Vs3Bet.parent(), Some(Scenario::Rfi));
        assert_eq!(Scenario::Vs4Bet.parent(), Some(Scenario::VsOpen));
        assert_eq!(Scenario::ThreeBetDefense.parent(), Some(Scenario::VsOpen));
    }

    #[test]
    fn test_requires_villain() {
        assert!(!Scenario::Rfi.requires_villain());
        assert!(Scenario::VsOpen.requires_villain());
        assert!(Scenario::Vs3Bet.requires_villain());
    }

    #[test]
    fn test_valid_villains_vs_open() {
        // Openers sit before the hero.
        assert_eq!(
            Scenario::VsOpen.valid_villains(Position::CO),
            &[Position::UTG, Position::MP]
        );
        assert!(Scenario::VsOpen.valid_villains(Position::UTG).is_empty());
    }

    #[test]
    fn test_valid_villains_vs_3bet() {
        // 3-bettors sit after the opener.
        assert_eq!(
            Scenario::Vs3Bet.valid_villains(Position::BTN),
            &[Position::SB, Position::BB]
        );
        assert!(Scenario::Vs3Bet.valid_villains(Position::BB).is_empty());
    }

    #[test]
    fn test_valid_villains_rfi_empty() {
        for hero in PREFLOP_ORDER {
            assert!(Scenario::Rfi.valid_villains(hero).is_empty());
        }
    }

    #[test]
    fn test_valid_scenarios() {
        let utg = Scenario::valid_scenarios(Position::UTG);
        assert_eq!(utg, vec![Scenario::Rfi, Scenario::Vs3Bet]);

        let bb = Scenario::valid_scenarios(Position::BB);
        assert!(!bb.contains(&Scenario::Rfi));
        assert!(bb.contains(&Scenario::VsOpen));
        assert!(bb.contains(&Scenario::Vs4Bet));

        let btn = Scenario::valid_scenarios(Position::BTN);
        assert!(btn.contains(&Scenario::Rfi));
        assert!(btn.contains(&Scenario::Vs3Bet));
        assert!(btn.contains(&Scenario::ThreeBetDefense));
    }

    #[test]
    fn test_name_roundtrip() {
        for scenario in [
            Scenario::Rfi,
            Scenario::VsOpen,
            Scenario::Vs3Bet,
            Scenario::Vs4Bet,
            Scenario::ThreeBetDefense,
        ] {
            assert_eq!(scenario.as_str().parse::<Scenario>().unwrap(), scenario);
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("RFI".parse::<Scenario>().unwrap(), Scenario::Rfi);
        assert_eq!("Vs-3Bet".parse::<Scenario>().unwrap(), Scenario::Vs3Bet);
        assert!("vs-5bet".parse::<Scenario>().is_err());
    }
}
