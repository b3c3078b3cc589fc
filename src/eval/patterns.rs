//! Line patterns and their scores
//!
//! A line pattern is a maximal run of one player's stones along one axis,
//! described by its length and how many of its two ends are open (the cell
//! just past the end is on the board and empty). Every score used by threat
//! detection, move ordering and static evaluation comes from this table.

use std::fmt;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five or more in a row
    pub const FIVE: i64 = 1_000_000;
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i64 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX
    pub const CLOSED_FOUR: i64 = 10_000;
    /// Open three: _OOO_
    pub const OPEN_THREE: i64 = 10_000;
    /// Closed three: XOOO_ or _OOOX
    pub const CLOSED_THREE: i64 = 1_000;
    pub const OPEN_TWO: i64 = 100;
    pub const CLOSED_TWO: i64 = 10;
    pub const OPEN_ONE: i64 = 10;
    pub const CLOSED_ONE: i64 = 1;
}

/// A run of stones along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Consecutive stones, including the anchor cell
    pub length: usize,
    /// Open ends, 0..=2
    pub open_ends: u8,
}

impl LineRun {
    #[inline]
    pub fn pattern(self) -> Pattern {
        Pattern::classify(self.length, self.open_ends)
    }

    #[inline]
    pub fn score(self) -> i64 {
        self.pattern().score()
    }
}

/// Named line patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Five,
    OpenFour,
    ClosedFour,
    OpenThree,
    ClosedThree,
    OpenTwo,
    ClosedTwo,
    OpenOne,
    ClosedOne,
    /// Shorter than five with both ends blocked, or no stones at all
    Dead,
}

impl Pattern {
    /// Classify a run by length and open ends
    pub fn classify(length: usize, open_ends: u8) -> Pattern {
        match (length, open_ends) {
            (5.., _) => Pattern::Five,
            (_, 0) | (0, _) => Pattern::Dead,
            (4, 2) => Pattern::OpenFour,
            (4, _) => Pattern::ClosedFour,
            (3, 2) => Pattern::OpenThree,
            (3, _) => Pattern::ClosedThree,
            (2, 2) => Pattern::OpenTwo,
            (2, _) => Pattern::ClosedTwo,
            (_, 2) => Pattern::OpenOne,
            _ => Pattern::ClosedOne,
        }
    }

    pub fn score(self) -> i64 {
        match self {
            Pattern::Five => PatternScore::FIVE,
            Pattern::OpenFour => PatternScore::OPEN_FOUR,
            Pattern::ClosedFour => PatternScore::CLOSED_FOUR,
            Pattern::OpenThree => PatternScore::OPEN_THREE,
            Pattern::ClosedThree => PatternScore::CLOSED_THREE,
            Pattern::OpenTwo => PatternScore::OPEN_TWO,
            Pattern::ClosedTwo => PatternScore::CLOSED_TWO,
            Pattern::OpenOne => PatternScore::OPEN_ONE,
            Pattern::ClosedOne => PatternScore::CLOSED_ONE,
            Pattern::Dead => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Five => "five",
            Pattern::OpenFour => "open four",
            Pattern::ClosedFour => "closed four",
            Pattern::OpenThree => "open three",
            Pattern::ClosedThree => "closed three",
            Pattern::OpenTwo => "open two",
            Pattern::ClosedTwo => "closed two",
            Pattern::OpenOne => "open one",
            Pattern::ClosedOne => "closed one",
            Pattern::Dead => "dead",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
