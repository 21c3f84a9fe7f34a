use std::fmt;
use std::str::FromStr;

use crate::core::errors::RangeLabError;

/// Card value, ordered from two up to ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// All values, from two up to ace.
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all values, in ascending order.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Parse a value from its character, case-insensitively.
    ///
    /// Returns `None` for anything that isn't one of
    /// `A K Q J T 9 8 7 6 5 4 3 2`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// The character for this value ("T" for ten, "A" for ace).
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// Numeric rank used by the evaluator: A=14, K=13, ..., 2=2.
    ///
    /// The ace additionally plays as the low end of the A-2-3-4-5 wheel;
    /// that special case lives in the evaluator, not here.
    pub fn rank(self) -> u8 {
        self as u8 + 2
    }
}

/// Card suit.
///
/// The declaration order (spade, heart, diamond, club) is the deterministic
/// enumeration order used everywhere combos are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    /// ♠
    Spade = 0,
    /// ♥
    Heart = 1,
    /// ♦
    Diamond = 2,
    /// ♣
    Club = 3,
}

/// All suits in enumeration order.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

impl Suit {
    /// Get all suits, in enumeration order.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Parse a suit from its letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'd' => Some(Self::Diamond),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// The letter for this suit ("s", "h", "d", "c").
    pub fn to_char(self) -> char {
        match self {
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Diamond => 'd',
            Self::Club => 'c',
        }
    }

    /// The glyph for this suit, for human-readable display.
    pub fn glyph(self) -> char {
        match self {
            Self::Spade => '♠',
            Self::Heart => '♥',
            Self::Diamond => '♦',
            Self::Club => '♣',
        }
    }
}

/// One of the 52 cards. Equality is by (value, suit).
///
/// # Examples
///
/// ```
/// use rangelab::core::{Card, Suit, Value};
///
/// let parsed: Card = "As".parse().unwrap();
/// assert_eq!(parsed, Card::new(Value::Ace, Suit::Spade));
/// assert_eq!(parsed.to_string(), "A♠");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    /// The card's value.
    pub value: Value,
    /// The card's suit.
    pub suit: Suit,
}

impl Card {
    /// Create a new card from a value and a suit.
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.glyph())
    }
}

/// Parse a card from a 2-character string like "As" or "kH".
///
/// Case-insensitive on both characters. Anything that isn't exactly a valid
/// value character followed by a valid suit letter is an error; probing
/// arbitrary strings never panics.
impl FromStr for Card {
    type Err = RangeLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (v, su) = match (chars.next(), chars.next(), chars.next()) {
            (Some(v), Some(su), None) => (v, su),
            _ => return Err(RangeLabError::InvalidCardString(s.to_string())),
        };

        let value =
            Value::from_char(v).ok_or_else(|| RangeLabError::InvalidCardString(s.to_string()))?;
        let suit =
            Suit::from_char(su).ok_or_else(|| RangeLabError::InvalidCardString(s.to_string()))?;

        Ok(Self { value, suit })
    }
}
