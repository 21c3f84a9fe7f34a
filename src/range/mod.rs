/// Module with the 169-bucket starting-hand classes and their combinatorics.
mod hand_class;
/// Export `HandClass` and `Shape`.
pub use self::hand_class::{HandClass, Shape};

/// Module with chart cells, actions, and weight normalization.
mod cell;
/// Export `Action`, `ActionWeights`, `Cell`, and `WeightedCell`.
pub use self::cell::{Action, ActionWeights, Cell, WeightedCell};
pub(crate) use self::cell::round_tenth;

/// Module with table positions and acting orders.
mod position;
/// Export `Position` and the acting orders.
pub use self::position::{Position, POSTFLOP_ORDER, PREFLOP_ORDER};

/// Module with the preflop scenarios and their relationships.
mod scenario;
/// Export `Scenario`.
pub use self::scenario::Scenario;

/// Module with preflop charts, chart keys, and chart collections.
mod chart;
/// Export `Chart`, `ChartKey`, `ChartSet`, and `ChartSource`.
pub use self::chart::{Chart, ChartKey, ChartSet, ChartSource};
