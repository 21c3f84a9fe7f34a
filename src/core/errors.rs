use thiserror::Error;

/// Errors for the card, hand notation, and evaluation layers.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RangeLabError {
    #[error("Unable to parse the card string {0}")]
    InvalidCardString(String),

    #[error("Unable to parse the hand notation {0}")]
    InvalidHandNotation(String),

    #[error("Unable to parse the position {0}")]
    InvalidPosition(String),

    #[error("Unable to parse the scenario {0}")]
    InvalidScenario(String),

    #[error("Unable to parse the chart key {0}")]
    InvalidChartKey(String),

    #[error("Card {0} appears twice in the hole cards")]
    DuplicateHoleCard(String),

    #[error("Board must have at least 3 cards, got {0}")]
    BoardTooSmall(usize),

    #[error("Board already has the maximum of 5 cards")]
    BoardFull,

    #[error("Card {0} is already on the board")]
    DuplicateBoardCard(String),
}
