//! rangelab is a library for studying preflop ranges on postflop boards.
//!
//! A range is one of the classic 13x13 preflop charts: each of the 169
//! starting-hand classes maps to an action, an even mix of two actions, or
//! an explicit weight with an action split. Given a chart and a flop (or
//! turn, or river), the analyzer enumerates every live combo, categorizes
//! it, and reports how the range breaks down by made hand, draw, and
//! action. The resolver sits one level up and answers which two charts
//! describe a heads-up pot between two seats, including cascading a
//! 3-bet-calling range against the opening range it grew out of.
//!
//! ```
//! use rangelab::analysis::{analyze_range, ActionFilter, HandCategory};
//! use rangelab::core::Board;
//! use rangelab::range::{Action, Chart, HandClass};
//!
//! let mut chart = Chart::new();
//! chart.set(HandClass::from_notation("AA").unwrap(), Action::Raise.into());
//! chart.set(HandClass::from_notation("AKs").unwrap(), Action::Call.into());
//!
//! let board = Board::new_from_str("AsKh7d").unwrap();
//! let result = analyze_range(&chart, &board, ActionFilter::default());
//!
//! // The As on the board blocks one AA combo and one AKs combo.
//! assert_eq!(result.total_combos, 5.0);
//! assert_eq!(result.by_category[0].category, HandCategory::Set);
//! ```

/// Analysis of ranges against boards: evaluation, aggregation, resolution.
pub mod analysis;
/// Core types: cards, boards, errors.
pub mod core;
/// Range representation: hand classes, cells, charts, positions, scenarios.
pub mod range;
