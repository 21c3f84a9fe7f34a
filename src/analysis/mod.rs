/// Module with the postflop hand categorizer.
mod evaluator;
/// Export `HandCategory` and `evaluate_hand`.
pub use self::evaluator::{evaluate_hand, HandCategory};

/// Module with the range-vs-board breakdown.
mod analyzer;
/// Export the analyzer types and entry points.
pub use self::analyzer::{
    analyze_range, group_categories, ActionFilter, ActionTally, AnalysisResult, CategoryResult,
    GroupedCategory, Grouping,
};

/// Module with range resolution: action filtering and weight cascading.
mod resolver;
/// Export the resolver types and entry points.
pub use self::resolver::{
    cascade_weights, filter_chart_by_actions, resolve_ranges, PotType, ResolveError,
    ResolvedRange, ResolvedRanges,
};
