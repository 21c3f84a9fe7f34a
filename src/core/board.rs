use std::ops::Deref;
use std::str::FromStr;

use crate::core::card::Card;
use crate::core::errors::RangeLabError;

/// The community board, built up incrementally from 0 to 5 cards.
///
/// Duplicate cards are rejected on insert so a board is always a set of
/// distinct cards in selection order. Every analysis entry point takes a
/// plain `&[Card]`, which a `Board` derefs to.
///
/// # Examples
///
/// ```
/// use rangelab::core::Board;
///
/// let mut board = Board::new_from_str("AsKh").unwrap();
/// board.push("7d".parse().unwrap()).unwrap();
/// assert_eq!(board.len(), 3);
///
/// // The same card can't be added twice.
/// assert!(board.push("As".parse().unwrap()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// The maximum number of community cards.
    pub const MAX_CARDS: usize = 5;

    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from concatenated 2-character card strings,
    /// e.g. `"AsKh7d"`.
    ///
    /// # Errors
    ///
    /// Fails on malformed card strings, duplicates, or more than 5 cards.
    pub fn new_from_str(s: &str) -> Result<Self, RangeLabError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(RangeLabError::InvalidCardString(s.to_string()));
        }

        let mut board = Self::new();
        for pair in chars.chunks(2) {
            let card: Card = pair.iter().collect::<String>().parse()?;
            board.push(card)?;
        }
        Ok(board)
    }

    /// Add a card to the board.
    ///
    /// # Errors
    ///
    /// Fails if the board already has 5 cards or already contains the card.
    pub fn push(&mut self, card: Card) -> Result<(), RangeLabError> {
        if self.cards.len() >= Self::MAX_CARDS {
            return Err(RangeLabError::BoardFull);
        }
        if self.cards.contains(&card) {
            return Err(RangeLabError::DuplicateBoardCard(card.to_string()));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Remove and return the card at `index`, or `None` if out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove all cards.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// The cards on the board, in selection order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// True once the board has the 3 cards the evaluator needs.
    pub fn is_complete_flop(&self) -> bool {
        self.cards.len() >= 3
    }
}

impl Deref for Board {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

impl FromStr for Board {
    type Err = RangeLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new_from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new_from_str() {
        let board = Board::new_from_str("AsKh7d").unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[0], "As".parse().unwrap());
        assert_eq!(board[2], "7d".parse().unwrap());
    }

    #[test]
    fn test_board_new_from_str_invalid() {
        assert!(Board::new_from_str("AsK").is_err());
        assert!(Board::new_from_str("AsXh").is_err());
        // Six cards is one too many.
        assert!(Board::new_from_str("AsKhQd2c3s4h").is_err());
    }

    #[test]
    fn test_board_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_complete_flop());
    }

    #[test]
    fn test_board_rejects_duplicates() {
        let mut board = Board::new_from_str("AsKh").unwrap();
        let err = board.push("As".parse().unwrap()).unwrap_err();
        assert_eq!(
            err,
            RangeLabError::DuplicateBoardCard("A♠".to_string())
        );
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_board_rejects_sixth_card() {
        let mut board = Board::new_from_str("AsKhQd2c3s").unwrap();
        assert!(board.is_complete_flop());
        let err = board.push("4h".parse().unwrap()).unwrap_err();
        assert_eq!(err, RangeLabError::BoardFull);
    }

    #[test]
    fn test_board_remove() {
        let mut board = Board::new_from_str("AsKh7d").unwrap();
        assert_eq!(board.remove(1), Some("Kh".parse().unwrap()));
        assert_eq!(board.len(), 2);
        assert_eq!(board.remove(5), None);
    }

    #[test]
    fn test_board_clear() {
        let mut board = Board::new_from_str("AsKh7d").unwrap();
        board.clear();
        assert!(board.is_empty());
    }
}
