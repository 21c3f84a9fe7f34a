/// Module with the card value, suit, and card types.
mod card;
/// Export `Card`, `Suit`, and `Value`.
pub use self::card::{Card, Suit, Value};

/// Module for the incrementally-built community board.
mod board;
/// Export `Board`.
pub use self::board::Board;

/// Module with the crate's error type.
mod errors;
/// Export `RangeLabError`.
pub use self::errors::RangeLabError;
