use std::fmt;

/// A preflop action a chart can assign to a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Action {
    /// Fold the hand.
    Fold,
    /// Call the current bet.
    Call,
    /// Raise.
    Raise,
    /// Shove all-in.
    AllIn,
}

/// All actions.
const ACTIONS: [Action; 4] = [Action::Fold, Action::Call, Action::Raise, Action::AllIn];

impl Action {
    /// Get all actions.
    pub const fn all() -> [Self; 4] {
        ACTIONS
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "allin",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(feature = "serde")]
fn is_zero(pct: &f64) -> bool {
    *pct == 0.0
}

/// Percentage split across the four actions. Each field is in `0.0..=100.0`
/// and the fields of a well-formed split sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionWeights {
    /// Percent folded.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub fold: f64,
    /// Percent called.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub call: f64,
    /// Percent raised.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub raise: f64,
    /// Percent shoved.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub allin: f64,
}

impl ActionWeights {
    /// The percentage assigned to one action.
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Fold => self.fold,
            Action::Call => self.call,
            Action::Raise => self.raise,
            Action::AllIn => self.allin,
        }
    }

    /// Set the percentage for one action.
    pub fn set(&mut self, action: Action, pct: f64) {
        match action {
            Action::Fold => self.fold = pct,
            Action::Call => self.call = pct,
            Action::Raise => self.raise = pct,
            Action::AllIn => self.allin = pct,
        }
    }

    /// A split that puts 100% on a single action.
    pub fn single(action: Action) -> Self {
        let mut weights = Self::default();
        weights.set(action, 100.0);
        weights
    }

    /// Percent of the split that continues (call + raise + allin).
    pub fn in_range_total(&self) -> f64 {
        self.call + self.raise + self.allin
    }

    /// Percent of the split that is aggressive (raise + allin).
    pub fn aggressive(&self) -> f64 {
        self.raise + self.allin
    }
}

/// A fully explicit cell: how often the hand is in the range at all, and how
/// that in-range portion splits across actions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedCell {
    /// Percent of the hand's combos that are played at all, `0.0..=100.0`.
    pub weight: f64,
    /// Action split of the played portion.
    pub actions: ActionWeights,
}

/// One cell of a preflop chart, in increasing explicitness: a pure action,
/// an even mix of two actions, or a fully weighted cell.
///
/// The serialized forms mirror the variants: `"raise"`,
/// `["raise", "call"]`, and `{"weight": 60.0, "actions": {...}}`.
///
/// # Examples
///
/// ```
/// use rangelab::range::{Action, Cell};
///
/// let cell = Cell::Mixed(Action::Raise, Action::Call);
/// let n = cell.normalize();
/// assert_eq!(n.weight, 100.0);
/// assert_eq!(n.actions.raise, 50.0);
/// assert_eq!(n.actions.call, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Cell {
    /// The hand always takes one action.
    Action(Action),
    /// The hand takes each of two actions half the time.
    Mixed(Action, Action),
    /// Explicit weight and action split.
    Weighted(WeightedCell),
}

impl Cell {
    /// Reduce any cell shape to an explicit [`WeightedCell`].
    ///
    /// A bare fold normalizes to weight 0 with an empty split, so "folds"
    /// and "not in the chart" are indistinguishable downstream. Normalizing
    /// an already weighted cell returns it unchanged, so the operation is
    /// idempotent.
    pub fn normalize(&self) -> WeightedCell {
        match *self {
            Cell::Action(Action::Fold) => WeightedCell {
                weight: 0.0,
                actions: ActionWeights::default(),
            },
            Cell::Action(action) => WeightedCell {
                weight: 100.0,
                actions: ActionWeights::single(action),
            },
            Cell::Mixed(a, b) if a == b => Cell::Action(a).normalize(),
            Cell::Mixed(a, b) => {
                let mut actions = ActionWeights::default();
                actions.set(a, 50.0);
                actions.set(b, 50.0);
                WeightedCell {
                    weight: 100.0,
                    actions,
                }
            }
            Cell::Weighted(w) => w,
        }
    }
}

impl From<Action> for Cell {
    fn from(action: Action) -> Self {
        Cell::Action(action)
    }
}

impl From<(Action, Action)> for Cell {
    fn from((a, b): (Action, Action)) -> Self {
        Cell::Mixed(a, b)
    }
}

impl From<WeightedCell> for Cell {
    fn from(weighted: WeightedCell) -> Self {
        Cell::Weighted(weighted)
    }
}

/// Round to one decimal place. All combo totals the crate reports go through
/// this so results are stable across float accumulation order.
pub(crate) fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
