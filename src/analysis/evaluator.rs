use std::fmt;

use crate::core::{Card, RangeLabError, Suit};

/// What a hand has made (or is drawing to) on a board, from strongest to
/// weakest. The ordering is the display order of analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HandCategory {
    /// Five consecutive cards of one suit.
    StraightFlush,
    /// Four of a kind.
    Quads,
    /// Trips plus a pair.
    FullHouse,
    /// Five cards of one suit.
    Flush,
    /// Five consecutive cards.
    Straight,
    /// Pocket pair that hit the board.
    Set,
    /// Board pair plus one matching hole card, or board trips.
    Trips,
    /// Two pairs.
    TwoPair,
    /// Pocket pair above the highest board card.
    Overpair,
    /// Hole card pairing the highest board card.
    TopPair,
    /// Hole card pairing the second-highest board card.
    SecondPair,
    /// Hole card pairing a lower board card, or a pocket pair below the
    /// third-highest board card.
    LowPair,
    /// Pocket pair between the highest and third-highest board cards.
    Underpair,
    /// Four cards of one suit.
    FlushDraw,
    /// Four consecutive cards, open on both ends.
    Oesd,
    /// Four cards of a straight with a gap inside.
    Gutshot,
    /// Both hole cards above the highest board card.
    Overcards,
    /// None of the above.
    Air,
}

/// All categories, strongest first.
const CATEGORIES: [HandCategory; 18] = [
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
    HandCategory::FlushDraw,
    HandCategory::Oesd,
    HandCategory::Gutshot,
    HandCategory::Overcards,
    HandCategory::Air,
];

impl HandCategory {
    /// Get all categories, strongest first.
    pub const fn all() -> [Self; 18] {
        CATEGORIES
    }

    /// Kebab-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StraightFlush => "straight-flush",
            Self::Quads => "quads",
            Self::FullHouse => "full-house",
            Self::Flush => "flush",
            Self::Straight => "straight",
            Self::Set => "set",
            Self::Trips => "trips",
            Self::TwoPair => "two-pair",
            Self::Overpair => "overpair",
            Self::TopPair => "top-pair",
            Self::SecondPair => "second-pair",
            Self::LowPair => "low-pair",
            Self::Underpair => "underpair",
            Self::FlushDraw => "flush-draw",
            Self::Oesd => "oesd",
            Self::Gutshot => "gutshot",
            Self::Overcards => "overcards",
            Self::Air => "air",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ranks run 2..=14 with the ace high. Index 0 and 1 are unused so a rank
/// indexes its own count.
const MAX_RANK: usize = 14;

fn rank_counts(cards: &[Card]) -> [u8; MAX_RANK + 1] {
    let mut counts = [0u8; MAX_RANK + 1];
    for card in cards {
        counts[card.value.rank() as usize] += 1;
    }
    counts
}

fn unique_ranks_desc(counts: &[u8; MAX_RANK + 1]) -> Vec<u8> {
    (2..=MAX_RANK as u8)
        .rev()
        .filter(|&r| counts[r as usize] > 0)
        .collect()
}

/// Highest rank of a straight among the given cards, `Some(5)` for the
/// A-2-3-4-5 wheel, `None` if there is no straight.
fn straight_high(cards: &[Card]) -> Option<u8> {
    let counts = rank_counts(cards);
    let ranks = unique_ranks_desc(&counts);

    let has = |r: u8| counts[r as usize] > 0;
    if has(14) && has(5) && has(4) && has(3) && has(2) {
        return Some(5);
    }

    for window in ranks.windows(5) {
        if window[0] - window[4] == 4 {
            return Some(window[0]);
        }
    }
    None
}

fn flush_suit(cards: &[Card]) -> Option<Suit> {
    for suit in Suit::suits() {
        if cards.iter().filter(|c| c.suit == suit).count() >= 5 {
            return Some(suit);
        }
    }
    None
}

fn has_flush_draw(cards: &[Card]) -> bool {
    Suit::suits()
        .iter()
        .any(|&suit| cards.iter().filter(|c| c.suit == suit).count() == 4)
}

enum StraightDraw {
    Oesd,
    Gutshot,
}

/// Straight draw detection. A draw only counts when at least one hole card
/// is part of the four cards that make it.
fn straight_draw(hole: (Card, Card), board: &[Card]) -> Option<StraightDraw> {
    let mut all: Vec<Card> = vec![hole.0, hole.1];
    all.extend_from_slice(board);
    let counts = rank_counts(&all);
    let has = |r: u8| r >= 2 && r <= MAX_RANK as u8 && counts[r as usize] > 0;

    let hole_ranks = [hole.0.value.rank(), hole.1.value.rank()];
    let hole_has = |r: u8| hole_ranks.contains(&r);

    // Open-ended: four consecutive ranks with both completing ranks live.
    for high in (5..=14u8).rev() {
        let needed = [high, high - 1, high - 2, high - 3];
        if needed.iter().all(|&r| has(r)) {
            let open_high = high < 14 && !has(high + 1);
            let open_low = high >= 5 && !has(high - 4);
            if open_high && open_low && needed.iter().any(|&r| hole_has(r)) {
                return Some(StraightDraw::Oesd);
            }
        }
    }

    // Wheel draw: four of A-2-3-4-5. Missing the 5 leaves an open end, a
    // hole inside the wheel is a gutshot.
    if has(14) {
        let wheel = [14u8, 2, 3, 4, 5];
        let missing: Vec<u8> = wheel.iter().copied().filter(|&r| !has(r)).collect();
        if missing.len() == 1 && wheel.iter().any(|&r| hole_has(r)) {
            return Some(if missing[0] == 5 {
                StraightDraw::Oesd
            } else {
                StraightDraw::Gutshot
            });
        }
    }

    // Gutshot: four of five consecutive ranks.
    for high in (6..=14u8).rev() {
        let window = [high, high - 1, high - 2, high - 3, high - 4];
        let present = window.iter().filter(|&&r| has(r)).count();
        if present == 4 && window.iter().any(|&r| hole_has(r)) {
            return Some(StraightDraw::Gutshot);
        }
    }

    None
}

/// Categorize two hole cards against a board of 3 to 5 cards.
///
/// Checks made hands from strongest to weakest, then draws, then overcards.
/// A board pair that doesn't involve the hole cards is not the hero's pair:
/// an unpaired hand on a paired board falls through to draws and air.
///
/// # Errors
///
/// Fails with [`RangeLabError::BoardTooSmall`] before the flop.
///
/// # Examples
///
/// ```
/// use rangelab::analysis::{evaluate_hand, HandCategory};
/// use rangelab::core::{Board, Card};
///
/// let board = Board::new_from_str("AsKh7d").unwrap();
/// let hole = ("Ah".parse::<Card>().unwrap(), "Ad".parse::<Card>().unwrap());
/// assert_eq!(evaluate_hand(hole, &board).unwrap(), HandCategory::Set);
///
/// let hole = ("8h".parse::<Card>().unwrap(), "8d".parse::<Card>().unwrap());
/// assert_eq!(evaluate_hand(hole, &board).unwrap(), HandCategory::Underpair);
/// ```
pub fn evaluate_hand(hole: (Card, Card), board: &[Card]) -> Result<HandCategory, RangeLabError> {
    if board.len() < 3 {
        return Err(RangeLabError::BoardTooSmall(board.len()));
    }

    let mut all: Vec<Card> = vec![hole.0, hole.1];
    all.extend_from_slice(board);

    let counts = rank_counts(&all);
    let mut board_ranks: Vec<u8> = board.iter().map(|c| c.value.rank()).collect();
    board_ranks.sort_unstable_by(|a, b| b.cmp(a));

    let hole_high = hole.0.value.rank().max(hole.1.value.rank());
    let hole_low = hole.0.value.rank().min(hole.1.value.rank());
    let is_pocket_pair = hole_high == hole_low;

    // Straight flush
    if let Some(suit) = flush_suit(&all) {
        let suited: Vec<Card> = all.iter().copied().filter(|c| c.suit == suit).collect();
        if straight_high(&suited).is_some() {
            return Ok(HandCategory::StraightFlush);
        }
    }

    // Quads
    if counts.iter().any(|&c| c == 4) {
        return Ok(HandCategory::Quads);
    }

    // Full house
    let mut sorted_counts: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
    sorted_counts.sort_unstable_by(|a, b| b.cmp(a));
    if sorted_counts[0] >= 3 && sorted_counts.len() > 1 && sorted_counts[1] >= 2 {
        return Ok(HandCategory::FullHouse);
    }

    // Flush
    if flush_suit(&all).is_some() {
        return Ok(HandCategory::Flush);
    }

    // Straight
    if straight_high(&all).is_some() {
        return Ok(HandCategory::Straight);
    }

    // Three of a kind
    if let Some(trip_rank) = (2..=MAX_RANK as u8).find(|&r| counts[r as usize] == 3) {
        if is_pocket_pair && hole_high == trip_rank {
            return Ok(HandCategory::Set);
        }
        return Ok(HandCategory::Trips);
    }

    // Pairs
    let pairs: Vec<u8> = (2..=MAX_RANK as u8)
        .filter(|&r| counts[r as usize] == 2)
        .collect();
    if pairs.len() >= 2 {
        return Ok(HandCategory::TwoPair);
    }
    if pairs.len() == 1 {
        let pair_rank = pairs[0];
        if is_pocket_pair {
            // The single pair is the pocket pair itself. It can't match a
            // board rank (that would be trips), so it sits below the third
            // board card, between board cards, or above them all.
            return Ok(if hole_high < board_ranks[2] {
                HandCategory::LowPair
            } else if hole_high > board_ranks[0] {
                HandCategory::Overpair
            } else {
                HandCategory::Underpair
            });
        }
        if pair_rank == hole_high || pair_rank == hole_low {
            return Ok(if pair_rank == board_ranks[0] {
                HandCategory::TopPair
            } else if pair_rank == board_ranks[1] {
                HandCategory::SecondPair
            } else {
                HandCategory::LowPair
            });
        }
        // A pair on the board that isn't ours. Fall through to draws.
    }

    // Draws
    if has_flush_draw(&all) {
        return Ok(HandCategory::FlushDraw);
    }
    match straight_draw(hole, board) {
        Some(StraightDraw::Oesd) => return Ok(HandCategory::Oesd),
        Some(StraightDraw::Gutshot) => return Ok(HandCategory::Gutshot),
        None => {}
    }

    // Overcards
    if hole_low > board_ranks[0] {
        return Ok(HandCategory::Overcards);
    }

    Ok(HandCategory::Air)
}
