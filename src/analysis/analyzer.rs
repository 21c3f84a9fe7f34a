use tracing::debug;

use crate::analysis::evaluator::{evaluate_hand, HandCategory};
use crate::core::Card;
use crate::range::{round_tenth, Chart, HandClass};

/// Which actions count toward the analyzed range. Fold never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFilter {
    /// Include the raise and all-in portions.
    pub show_raise: bool,
    /// Include the call portion.
    pub show_call: bool,
}

impl Default for ActionFilter {
    fn default() -> Self {
        Self {
            show_raise: true,
            show_call: true,
        }
    }
}

impl ActionFilter {
    /// A filter that includes every continuing action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the raise and all-in portions.
    pub fn raises_only() -> Self {
        Self {
            show_raise: true,
            show_call: false,
        }
    }

    /// Only the call portion.
    pub fn calls_only() -> Self {
        Self {
            show_raise: false,
            show_call: true,
        }
    }

    /// Fraction (0 to 1) of a normalized cell that passes the filter.
    fn cell_fraction(&self, weight: f64, actions: &crate::range::ActionWeights) -> f64 {
        let mut included = 0.0;
        if self.show_raise {
            included += actions.raise / 100.0;
            included += actions.allin / 100.0;
        }
        if self.show_call {
            included += actions.call / 100.0;
        }
        weight / 100.0 * included
    }
}

/// Combo totals per action across a whole chart, blockers applied.
/// Out-of-range combos count as folds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTally {
    /// Raised combos.
    pub raise: f64,
    /// Called combos.
    pub call: f64,
    /// Folded combos, including hands not in the chart.
    pub fold: f64,
    /// Shoved combos.
    pub allin: f64,
}

/// One row of an analysis: a category, its weighted combos, its share of
/// the filtered range, and which hand classes landed in it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryResult {
    /// The hand category.
    pub category: HandCategory,
    /// Weighted combos in the category, rounded to one decimal.
    pub combos: f64,
    /// Share of the filtered range, in percent. Unrounded.
    pub percentage: f64,
    /// Hand classes with at least one combo in the category, in grid order.
    pub hands: Vec<HandClass>,
}

/// The full breakdown of a chart on a board.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Weighted combos that passed the filter, rounded to one decimal.
    pub total_combos: f64,
    /// Per-category rows, strongest category first. Empty categories are
    /// omitted.
    pub by_category: Vec<CategoryResult>,
    /// Action totals over the whole chart, ignoring the filter.
    pub by_action: ActionTally,
}

impl AnalysisResult {
    /// The empty result, used when the board is short of a flop.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The hand classes that landed in a category.
    pub fn hands_in_category(&self, category: HandCategory) -> &[HandClass] {
        self.by_category
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.hands.as_slice())
            .unwrap_or(&[])
    }
}

/// Analyze a chart against a board.
///
/// Every one of the 169 hand classes is visited in grid order. The action
/// tally sees the whole chart with blockers applied; the category breakdown
/// sees only the portion that passes `filter`, with each surviving combo
/// weighted by the cell's weight times its filtered action share.
///
/// A board shorter than a flop yields the empty result rather than an
/// error, since there is nothing to evaluate yet.
///
/// # Examples
///
/// ```
/// use rangelab::analysis::{analyze_range, ActionFilter, HandCategory};
/// use rangelab::core::Board;
/// use rangelab::range::{Action, Chart, HandClass};
///
/// let mut chart = Chart::new();
/// chart.set(HandClass::from_notation("AA").unwrap(), Action::Raise.into());
///
/// let board = Board::new_from_str("AsKh7d").unwrap();
/// let result = analyze_range(&chart, &board, ActionFilter::default());
/// // One ace on the board leaves 3 combos of AA, all sets.
/// assert_eq!(result.total_combos, 3.0);
/// assert_eq!(result.by_category[0].category, HandCategory::Set);
/// ```
pub fn analyze_range(chart: &Chart, board: &[Card], filter: ActionFilter) -> AnalysisResult {
    if board.len() < 3 {
        return AnalysisResult::empty();
    }

    let mut combos_by_category = [0.0f64; 18];
    let mut hands_by_category: Vec<Vec<HandClass>> = vec![Vec::new(); 18];
    let mut tally = ActionTally::default();
    let mut total = 0.0f64;

    for hand in HandClass::grid() {
        let n = chart.get_or_fold(hand).normalize();
        let available = hand.available_combos(board);
        let base = available.len() as f64;

        // Action totals are unfiltered. Whatever isn't in range folds.
        let in_range = base * n.weight / 100.0;
        tally.fold += in_range * n.actions.fold / 100.0;
        tally.call += in_range * n.actions.call / 100.0;
        tally.raise += in_range * n.actions.raise / 100.0;
        tally.allin += in_range * n.actions.allin / 100.0;
        tally.fold += base - in_range;

        let weight = filter.cell_fraction(n.weight, &n.actions);
        if weight <= 0.0 {
            continue;
        }

        for combo in available {
            if let Ok(category) = evaluate_hand(combo, board) {
                let idx = category as usize;
                combos_by_category[idx] += weight;
                if hands_by_category[idx].last() != Some(&hand) {
                    hands_by_category[idx].push(hand);
                }
                total += weight;
            }
        }
    }

    let by_category: Vec<CategoryResult> = HandCategory::all()
        .into_iter()
        .filter(|&category| combos_by_category[category as usize] > 0.0)
        .map(|category| {
            let combos = combos_by_category[category as usize];
            CategoryResult {
                category,
                combos: round_tenth(combos),
                percentage: if total > 0.0 {
                    combos / total * 100.0
                } else {
                    0.0
                },
                hands: std::mem::take(&mut hands_by_category[category as usize]),
            }
        })
        .collect();

    debug!(
        total_combos = total,
        categories = by_category.len(),
        board_len = board.len(),
        "analyzed range"
    );

    AnalysisResult {
        total_combos: round_tenth(total),
        by_category,
        by_action: ActionTally {
            raise: round_tenth(tally.raise),
            call: round_tenth(tally.call),
            fold: round_tenth(tally.fold),
            allin: round_tenth(tally.allin),
        },
    }
}

/// How coarsely to bucket categories for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Grouping {
    /// One bucket per category.
    Detailed,
    /// Made hands, draws, nothing.
    Simple,
    /// Strong made, two pair, top pair+, other pairs, draws, nothing.
    Standard,
}

/// A bucket of categories summed together.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupedCategory {
    /// The bucket's name.
    pub name: &'static str,
    /// Summed combos, rounded to one decimal.
    pub combos: f64,
    /// Summed percentage.
    pub percentage: f64,
    /// Union of the bucket's hand classes, first appearance order.
    pub hands: Vec<HandClass>,
}

const SIMPLE_BUCKETS: &[(&str, &[HandCategory])] = &[
    (
        "made-hands",
        &[
            HandCategory::StraightFlush,
            HandCategory::Quads,
            HandCategory::FullHouse,
            HandCategory::Flush,
            HandCategory::Straight,
            HandCategory::Set,
            HandCategory::Trips,
            HandCategory::TwoPair,
            HandCategory::Overpair,
            HandCategory::TopPair,
            HandCategory::SecondPair,
            HandCategory::LowPair,
            HandCategory::Underpair,
        ],
    ),
    (
        "draws",
        &[
            HandCategory::FlushDraw,
            HandCategory::Oesd,
            HandCategory::Gutshot,
        ],
    ),
    ("nothing", &[HandCategory::Overcards, HandCategory::Air]),
];

const STANDARD_BUCKETS: &[(&str, &[HandCategory])] = &[
    (
        "strong-made",
        &[
            HandCategory::StraightFlush,
            HandCategory::Quads,
            HandCategory::FullHouse,
            HandCategory::Flush,
            HandCategory::Straight,
            HandCategory::Set,
            HandCategory::Trips,
        ],
    ),
    ("two-pair", &[HandCategory::TwoPair]),
    ("top-pair", &[HandCategory::Overpair, HandCategory::TopPair]),
    (
        "other-pair",
        &[
            HandCategory::SecondPair,
            HandCategory::LowPair,
            HandCategory::Underpair,
        ],
    ),
    (
        "draws",
        &[
            HandCategory::FlushDraw,
            HandCategory::Oesd,
            HandCategory::Gutshot,
        ],
    ),
    ("nothing", &[HandCategory::Overcards, HandCategory::Air]),
];

/// Bucket per-category rows for display. Detailed grouping keeps one bucket
/// per category; empty buckets are dropped.
pub fn group_categories(results: &[CategoryResult], grouping: Grouping) -> Vec<GroupedCategory> {
    let buckets: &[(&str, &[HandCategory])] = match grouping {
        Grouping::Detailed => {
            return results
                .iter()
                .map(|r| GroupedCategory {
                    name: r.category.as_str(),
                    combos: r.combos,
                    percentage: r.percentage,
                    hands: r.hands.clone(),
                })
                .collect();
        }
        Grouping::Simple => SIMPLE_BUCKETS,
        Grouping::Standard => STANDARD_BUCKETS,
    };

    let mut grouped = Vec::new();
    for &(name, categories) in buckets {
        let matching: Vec<&CategoryResult> = results
            .iter()
            .filter(|r| categories.contains(&r.category))
            .collect();
        if matching.is_empty() {
            continue;
        }

        let combos: f64 = matching.iter().map(|r| r.combos).sum();
        let percentage: f64 = matching.iter().map(|r| r.percentage).sum();
        let mut hands = Vec::new();
        for result in &matching {
            for hand in &result.hands {
                if !hands.contains(hand) {
                    hands.push(*hand);
                }
            }
        }

        grouped.push(GroupedCategory {
            name,
            combos: round_tenth(combos),
            percentage,
            hands,
        });
    }
    grouped
}
