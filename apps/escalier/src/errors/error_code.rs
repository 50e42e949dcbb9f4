//! Error codes surfaced to the input layer.
//!
//! Each code is SCREAMING_SNAKE_CASE and stable; the input layer keys its
//! messages on these strings. Add new codes here, never pass ad-hoc strings.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Setup
    /// Player count, names, or options rejected
    InvalidConfiguration,

    // Bidding
    /// Fewer than two players left in the round
    TooFewActivePlayers,
    /// Bid outside `0..=cards`
    BidOutOfRange,
    /// Abandon or reversal not covered by the half's budget
    BudgetExceeded,
    /// Two seats asked for a reversal in the same round
    DuplicateReversal,

    // Tricks
    /// Trick count outside `0..=cards`
    TrickOutOfRange,
    /// Trick counts do not add up to the cards dealt
    TrickSumMismatch,

    // Lifecycle
    /// Undo requested before any round was scored
    NothingToUndo,
    /// Operation not allowed in the current phase
    PhaseMismatch,
    /// Input did not have one entry per seat
    SeatCountMismatch,
    /// No session has been started or resumed
    NoActiveSession,

    // Persistence
    /// Saved session failed its consistency checks
    DataCorruption,
    /// Saved session could not be read or written
    StorageError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::TooFewActivePlayers => "TOO_FEW_ACTIVE_PLAYERS",
            Self::BidOutOfRange => "BID_OUT_OF_RANGE",
            Self::BudgetExceeded => "BUDGET_EXCEEDED",
            Self::DuplicateReversal => "DUPLICATE_REVERSAL",
            Self::TrickOutOfRange => "TRICK_OUT_OF_RANGE",
            Self::TrickSumMismatch => "TRICK_SUM_MISMATCH",
            Self::NothingToUndo => "NOTHING_TO_UNDO",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::SeatCountMismatch => "SEAT_COUNT_MISMATCH",
            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
