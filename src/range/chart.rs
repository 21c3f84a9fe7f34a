use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::RangeLabError;
use crate::range::cell::{round_tenth, Action, Cell};
use crate::range::hand_class::HandClass;
use crate::range::position::Position;
use crate::range::scenario::Scenario;

/// A preflop chart: a sparse map from hand class to cell.
///
/// Hands that aren't in the map are implicit folds, so a chart only ever
/// stores the hands that are played. [`Chart::get_or_fold`] is the accessor
/// that makes the implicit fold explicit.
///
/// # Examples
///
/// ```
/// use rangelab::range::{Action, Cell, Chart, HandClass};
///
/// let mut chart = Chart::new();
/// chart.set(HandClass::from_notation("AA").unwrap(), Action::Raise.into());
/// chart.set(HandClass::from_notation("AKs").unwrap(), Action::Call.into());
///
/// let t2o = HandClass::from_notation("T2o").unwrap();
/// assert_eq!(chart.get_or_fold(t2o), Cell::Action(Action::Fold));
/// assert_eq!(chart.combo_count(), 10.0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Chart {
    cells: HashMap<HandClass, Cell>,
}

impl Chart {
    /// Create an empty chart. Every hand folds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for a hand, if the chart stores one.
    pub fn get(&self, hand: HandClass) -> Option<&Cell> {
        self.cells.get(&hand)
    }

    /// The cell for a hand, treating absence as a fold.
    pub fn get_or_fold(&self, hand: HandClass) -> Cell {
        self.cells
            .get(&hand)
            .copied()
            .unwrap_or(Cell::Action(Action::Fold))
    }

    /// Set the cell for a hand.
    pub fn set(&mut self, hand: HandClass, cell: Cell) {
        self.cells.insert(hand, cell);
    }

    /// Remove a hand from the chart, returning its cell.
    pub fn remove(&mut self, hand: HandClass) -> Option<Cell> {
        self.cells.remove(&hand)
    }

    /// Iterate the stored cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&HandClass, &Cell)> {
        self.cells.iter()
    }

    /// Number of hands stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the chart stores no hands.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Weighted combo count of the whole chart, before any board blockers.
    ///
    /// Each hand contributes its base combos scaled by the cell's weight;
    /// folds and empty splits contribute nothing. The result is rounded to
    /// one decimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangelab::range::{Action, ActionWeights, Cell, Chart, HandClass, WeightedCell};
    ///
    /// let mut chart = Chart::new();
    /// chart.set(
    ///     HandClass::from_notation("AA").unwrap(),
    ///     Cell::Weighted(WeightedCell {
    ///         weight: 50.0,
    ///         actions: ActionWeights::single(Action::Raise),
    ///     }),
    /// );
    /// assert_eq!(chart.combo_count(), 3.0);
    /// ```
    pub fn combo_count(&self) -> f64 {
        let mut total = 0.0;
        for (hand, cell) in &self.cells {
            let n = cell.normalize();
            if n.weight <= 0.0 || n.actions.in_range_total() <= 0.0 {
                continue;
            }
            total += hand.base_combos() as f64 * n.weight / 100.0;
        }
        round_tenth(total)
    }
}

impl FromIterator<(HandClass, Cell)> for Chart {
    fn from_iter<T: IntoIterator<Item = (HandClass, Cell)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Identifies one chart in a chart set: hero seat, scenario, and the
/// villain seat when the scenario has one.
///
/// The display form is the storage key format: `"BTN-RFI"`,
/// `"BB-vs-open-CO"`, `"BTN-vs-3bet-BB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ChartKey {
    /// The seat the chart is for.
    pub hero: Position,
    /// The preflop spot.
    pub scenario: Scenario,
    /// The opposing seat, for scenarios that have one.
    pub villain: Option<Position>,
}

impl ChartKey {
    /// Create a new chart key.
    pub fn new(hero: Position, scenario: Scenario, villain: Option<Position>) -> Self {
        Self {
            hero,
            scenario,
            villain,
        }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.villain {
            Some(villain) => write!(f, "{}-{}-{}", self.hero, self.scenario, villain),
            None => write!(f, "{}-{}", self.hero, self.scenario),
        }
    }
}

impl FromStr for ChartKey {
    type Err = RangeLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeLabError::InvalidChartKey(s.to_string());

        let segments: Vec<&str> = s.split('-').collect();
        if segments.len() < 2 {
            return Err(invalid());
        }

        let hero: Position = segments[0].parse().map_err(|_| invalid())?;

        // The scenario name may itself contain dashes, so try the last
        // segment as a villain first and fall back to a villain-free key.
        if segments.len() > 2 {
            if let Ok(villain) = segments[segments.len() - 1].parse::<Position>() {
                let scenario: Scenario = segments[1..segments.len() - 1]
                    .join("-")
                    .parse()
                    .map_err(|_| invalid())?;
                return Ok(Self::new(hero, scenario, Some(villain)));
            }
        }

        let scenario: Scenario = segments[1..].join("-").parse().map_err(|_| invalid())?;
        Ok(Self::new(hero, scenario, None))
    }
}

impl TryFrom<String> for ChartKey {
    type Error = RangeLabError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChartKey> for String {
    fn from(key: ChartKey) -> Self {
        key.to_string()
    }
}

/// A keyed collection of charts, typically one whole strategy pack.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChartSet {
    charts: HashMap<ChartKey, Chart>,
}

impl ChartSet {
    /// Create an empty chart set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chart under a key, replacing any previous chart.
    pub fn insert(&mut self, key: ChartKey, chart: Chart) {
        self.charts.insert(key, chart);
    }

    /// The chart stored under a key.
    pub fn get(&self, key: &ChartKey) -> Option<&Chart> {
        self.charts.get(key)
    }

    /// Number of charts stored.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// True if no charts are stored.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Iterate the stored charts in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChartKey, &Chart)> {
        self.charts.iter()
    }
}

/// Anything that can look up a chart for a spot. The range resolver is
/// generic over this so callers can back it with a [`ChartSet`], a database,
/// or a fixture.
pub trait ChartSource {
    /// The chart for a hero seat in a scenario, against an optional villain.
    fn chart(
        &self,
        hero: Position,
        scenario: Scenario,
        villain: Option<Position>,
    ) -> Option<&Chart>;
}

impl ChartSource for ChartSet {
    fn chart(
        &self,
        hero: Position,
        scenario: Scenario,
        villain: Option<Position>,
    ) -> Option<&Chart> {
        self.get(&ChartKey::new(hero, scenario, villain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::cell::{ActionWeights, WeightedCell};

    fn class(s: &str) -> HandClass {
        HandClass::from_notation(s).unwrap()
    }

    // ========== Chart tests ==========

    #[test]
    fn test_missing_hand_is_fold() {
        let chart = Chart::new();
        assert_eq!(chart.get(class("AA")), None);
        assert_eq!(chart.get_or_fold(class("AA")), Cell::Action(Action::Fold));
    }

    #[test]
    fn test_set_get_remove() {
        let mut chart = Chart::new();
        chart.set(class("AA"), Action::Raise.into());
        assert_eq!(chart.get_or_fold(class("AA")), Cell::Action(Action::Raise));
        assert_eq!(chart.len(), 1);

        assert_eq!(chart.remove(class("AA")), Some(Cell::Action(Action::Raise)));
        assert!(chart.is_empty());
    }

    #[test]
    fn test_combo_count_empty() {
        assert_eq!(Chart::new().combo_count(), 0.0);
    }

    #[test]
    fn test_combo_count_pure_actions() {
        let mut chart = Chart::new();
        chart.set(class("AA"), Action::Raise.into());
        assert_eq!(chart.combo_count(), 6.0);

        chart.set(class("AKs"), Action::Call.into());
        chart.set(class("AKo"), Action::Raise.into());
        assert_eq!(chart.combo_count(), 22.0);
    }

    #[test]
    fn test_combo_count_weighted() {
        let mut chart = Chart::new();
        chart.set(
            class("AA"),
            Cell::Weighted(WeightedCell {
                weight: 50.0,
                actions: ActionWeights::single(Action::Raise),
            }),
        );
        assert_eq!(chart.combo_count(), 3.0);
    }

    #[test]
    fn test_combo_count_skips_folds() {
        let mut chart = Chart::new();
        chart.set(class("72o"), Action::Fold.into());
        chart.set(
            class("T9s"),
            Cell::Weighted(WeightedCell {
                weight: 100.0,
                actions: ActionWeights {
                    fold: 100.0,
                    ..Default::default()
                },
            }),
        );
        assert_eq!(chart.combo_count(), 0.0);

        // A fold entry contributes nothing next to a played hand.
        chart.set(class("AA"), Action::Raise.into());
        chart.set(class("KK"), Action::Fold.into());
        assert_eq!(chart.combo_count(), 6.0);
    }

    #[test]
    fn test_from_iterator() {
        let chart: Chart = [
            (class("AA"), Cell::Action(Action::Raise)),
            (class("KK"), Cell::Action(Action::Raise)),
        ]
        .into_iter()
        .collect();
        assert_eq!(chart.combo_count(), 12.0);
    }

    // ========== ChartKey tests ==========

    #[test]
    fn test_key_display() {
        let rfi = ChartKey::new(Position::BTN, Scenario::Rfi, None);
        assert_eq!(rfi.to_string(), "BTN-RFI");

        let vs3bet = ChartKey::new(Position::BTN, Scenario::Vs3Bet, Some(Position::BB));
        assert_eq!(vs3bet.to_string(), "BTN-vs-3bet-BB");
    }

    #[test]
    fn test_key_parse_roundtrip() {
        for key in [
            ChartKey::new(Position::UTG, Scenario::Rfi, None),
            ChartKey::new(Position::BB, Scenario::VsOpen, Some(Position::CO)),
            ChartKey::new(Position::BTN, Scenario::Vs3Bet, Some(Position::SB)),
            ChartKey::new(Position::CO, Scenario::ThreeBetDefense, Some(Position::MP)),
        ] {
            let parsed: ChartKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_key_parse_invalid() {
        assert!("BTN".parse::<ChartKey>().is_err());
        assert!("XX-RFI".parse::<ChartKey>().is_err());
        assert!("BTN-limp".parse::<ChartKey>().is_err());
    }

    // ========== ChartSet tests ==========

    #[test]
    fn test_chart_set_lookup() {
        let mut set = ChartSet::new();
        let key = ChartKey::new(Position::BTN, Scenario::Rfi, None);
        let mut chart = Chart::new();
        chart.set(class("AA"), Action::Raise.into());
        set.insert(key, chart);

        assert_eq!(set.len(), 1);
        let found = set.chart(Position::BTN, Scenario::Rfi, None).unwrap();
        assert_eq!(found.combo_count(), 6.0);
        assert!(set.chart(Position::SB, Scenario::Rfi, None).is_none());
    }

    // ========== Serde tests ==========

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_chart_serde_roundtrip() {
            let mut chart = Chart::new();
            chart.set(class("AA"), Action::Raise.into());
            chart.set(class("AKs"), Cell::Mixed(Action::Raise, Action::Call));

            let json = serde_json::to_string(&chart).unwrap();
            let parsed: Chart = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.len(), 2);
            assert_eq!(
                parsed.get_or_fold(class("AA")),
                Cell::Action(Action::Raise)
            );
        }

        #[test]
        fn test_chart_set_serde_keys() {
            let mut set = ChartSet::new();
            set.insert(
                ChartKey::new(Position::BTN, Scenario::Vs3Bet, Some(Position::BB)),
                Chart::new(),
            );
            let json = serde_json::to_string(&set).unwrap();
            assert!(json.contains("BTN-vs-3bet-BB"));

            let parsed: ChartSet = serde_json::from_str(&json).unwrap();
            assert!(parsed
                .chart(Position::BTN, Scenario::Vs3Bet, Some(Position::BB))
                .is_some());
        }
    }
}
