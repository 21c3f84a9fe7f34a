use std::fmt;

use crate::core::{Card, RangeLabError, Suit, Value};

/// How the two cards of a starting hand relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Shape {
    /// Both cards share a value ("AA"). 6 combos.
    Pair,
    /// Both cards share a suit ("AKs"). 4 combos.
    Suited,
    /// Different values, different suits ("AKo"). 12 combos.
    Offsuit,
}

/// One of the 169 canonical starting-hand buckets of the 13x13 matrix:
/// 13 pocket pairs, 78 suited hands, and 78 offsuit hands.
///
/// # Examples
///
/// ```
/// use rangelab::range::{HandClass, Shape};
/// use rangelab::core::Value;
///
/// let aks = HandClass::from_notation("AKs").unwrap();
/// assert_eq!(aks.shape(), Shape::Suited);
/// assert_eq!(aks.base_combos(), 4);
///
/// // Values are auto-ordered.
/// let same = HandClass::new(Value::King, Value::Ace, true);
/// assert_eq!(aks, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct HandClass {
    /// Higher or equal value card
    high: Value,
    /// Lower or equal value card
    low: Value,
    /// Pair / suited / offsuit
    shape: Shape,
}

impl HandClass {
    /// Create a new HandClass from two values and suitedness.
    ///
    /// Values are automatically ordered so that `high >= low`. Equal values
    /// are always a pair regardless of `suited`.
    pub fn new(v1: Value, v2: Value, suited: bool) -> Self {
        let (high, low) = if v1 >= v2 { (v1, v2) } else { (v2, v1) };
        let shape = if high == low {
            Shape::Pair
        } else if suited {
            Shape::Suited
        } else {
            Shape::Offsuit
        };
        Self { high, low, shape }
    }

    /// Returns the higher card value.
    pub fn high(&self) -> Value {
        self.high
    }

    /// Returns the lower card value.
    pub fn low(&self) -> Value {
        self.low
    }

    /// Returns the hand's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns true if this is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.shape == Shape::Pair
    }

    /// Parse from notation: "AA", "AKs", or "AKo", case-insensitively.
    ///
    /// Anything that isn't exactly one of the 169 canonical names is an
    /// error ("AK" without a suffix, "AAs", "AAo", unknown characters).
    /// Probing arbitrary strings never panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangelab::range::HandClass;
    ///
    /// assert!(HandClass::from_notation("T9s").is_ok());
    /// assert!(HandClass::from_notation("t9S").is_ok());
    /// assert!(HandClass::from_notation("AK").is_err());
    /// assert!(HandClass::from_notation("AAs").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Self, RangeLabError> {
        let invalid = || RangeLabError::InvalidHandNotation(s.to_string());

        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 2 || chars.len() > 3 {
            return Err(invalid());
        }

        let v1 = Value::from_char(chars[0]).ok_or_else(invalid)?;
        let v2 = Value::from_char(chars[1]).ok_or_else(invalid)?;

        let suited = if chars.len() == 2 {
            // Two characters must name a pair.
            if v1 != v2 {
                return Err(invalid());
            }
            false
        } else {
            // Suffixed names must not be pairs.
            if v1 == v2 {
                return Err(invalid());
            }
            match chars[2].to_ascii_lowercase() {
                's' => true,
                'o' => false,
                _ => return Err(invalid()),
            }
        };

        Ok(Self::new(v1, v2, suited))
    }

    /// Convert to notation: "AA", "AKs", or "AKo".
    pub fn to_notation(&self) -> String {
        let high = self.high.to_char();
        let low = self.low.to_char();
        match self.shape {
            Shape::Pair => format!("{}{}", high, low),
            Shape::Suited => format!("{}{}s", high, low),
            Shape::Offsuit => format!("{}{}o", high, low),
        }
    }

    /// The combo count before any board cards are removed:
    /// 6 for pairs, 4 for suited, 12 for offsuit.
    pub fn base_combos(&self) -> usize {
        match self.shape {
            Shape::Pair => 6,
            Shape::Suited => 4,
            Shape::Offsuit => 12,
        }
    }

    /// Enumerate every concrete card pair this hand represents.
    ///
    /// Pairs choose 2 of the 4 suits (6 combos), suited hands take one combo
    /// per suit (4), and offsuit hands take every ordered pair of distinct
    /// suits (12). The order is deterministic: suits are walked in
    /// spade/heart/diamond/club order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangelab::range::HandClass;
    ///
    /// let combos = HandClass::from_notation("AA").unwrap().combos();
    /// assert_eq!(combos.len(), 6);
    /// for (a, b) in combos {
    ///     assert_ne!(a.suit, b.suit);
    /// }
    /// ```
    pub fn combos(&self) -> Vec<(Card, Card)> {
        let suits = Suit::suits();
        let mut combos = Vec::with_capacity(self.base_combos());

        match self.shape {
            Shape::Pair => {
                for (i, &s1) in suits.iter().enumerate() {
                    for &s2 in &suits[i + 1..] {
                        combos.push((Card::new(self.high, s1), Card::new(self.low, s2)));
                    }
                }
            }
            Shape::Suited => {
                for &suit in &suits {
                    combos.push((Card::new(self.high, suit), Card::new(self.low, suit)));
                }
            }
            Shape::Offsuit => {
                for &s1 in &suits {
                    for &s2 in &suits {
                        if s1 != s2 {
                            combos.push((Card::new(self.high, s1), Card::new(self.low, s2)));
                        }
                    }
                }
            }
        }

        combos
    }

    /// The combos still possible once board blockers are removed.
    ///
    /// A combo is excluded when either of its cards appears on the board.
    /// Enumeration order is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangelab::range::HandClass;
    /// use rangelab::core::Board;
    ///
    /// let board = Board::new_from_str("As").unwrap();
    /// let aa = HandClass::from_notation("AA").unwrap();
    /// // One ace gone: C(3, 2) = 3 combos left.
    /// assert_eq!(aa.available_combos(&board).len(), 3);
    /// ```
    pub fn available_combos(&self, board: &[Card]) -> Vec<(Card, Card)> {
        self.combos()
            .into_iter()
            .filter(|(a, b)| !board.contains(a) && !board.contains(b))
            .collect()
    }

    /// Count of combos remaining against a board.
    pub fn combo_count(&self, board: &[Card]) -> usize {
        self.available_combos(board).len()
    }

    /// How many combos the board blocks.
    pub fn removed_combos(&self, board: &[Card]) -> usize {
        self.base_combos() - self.combo_count(board)
    }

    /// All 169 hand classes in the fixed 13x13 grid order: rows and columns
    /// both run ace-first, the diagonal is pairs, above the diagonal is
    /// suited, below is offsuit.
    ///
    /// This is the iteration order the range analyzer uses, so results are
    /// reproducible.
    pub fn grid() -> Vec<Self> {
        let mut values = Value::values();
        values.reverse();

        let mut hands = Vec::with_capacity(169);
        for row in 0..13 {
            for col in 0..13 {
                hands.push(Self::new(values[row], values[col], row < col));
            }
        }
        hands
    }

    /// All 169 hand classes. Same set as [`HandClass::grid`].
    pub fn all() -> Vec<Self> {
        Self::grid()
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl TryFrom<String> for HandClass {
    type Error = RangeLabError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl From<HandClass> for String {
    fn from(hand: HandClass) -> Self {
        hand.to_notation()
    }
}

/// Classify two concrete hole cards into their canonical bucket.
///
/// # Examples
///
/// ```
/// use rangelab::range::HandClass;
/// use rangelab::core::Card;
///
/// let hole = ("As".parse::<Card>().unwrap(), "Ks".parse::<Card>().unwrap());
/// let class = HandClass::try_from(hole).unwrap();
/// assert_eq!(class.to_notation(), "AKs");
/// ```
impl TryFrom<(Card, Card)> for HandClass {
    type Error = RangeLabError;

    fn try_from((c1, c2): (Card, Card)) -> Result<Self, Self::Error> {
        if c1 == c2 {
            return Err(RangeLabError::DuplicateHoleCard(c1.to_string()));
        }
        Ok(Self::new(c1.value, c2.value, c1.suit == c2.suit))
    }
}
