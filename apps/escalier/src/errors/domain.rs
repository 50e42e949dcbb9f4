//! Domain-level error type returned by every session operation.
//!
//! All variants are recoverable: a failing call leaves the session exactly
//! as it was, and the variant carries enough context (seat, bound) for the
//! input layer to re-prompt.

use thiserror::Error;

use crate::domain::state::{Phase, Seat};
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid configuration: {detail}")]
    InvalidConfiguration { detail: String },

    #[error("at least {required} players must play this round, only {active} would")]
    TooFewActivePlayers { active: u8, required: u8 },

    #[error("bid {bid} from seat {seat} is outside 0..={max}")]
    BidOutOfRange { seat: Seat, bid: u8, max: u8 },

    #[error("seat {seat} needs {required} abandons but has {remaining} left in this half")]
    BudgetExceeded {
        seat: Seat,
        required: u8,
        remaining: u8,
    },

    #[error("only one reversal per round: seats {first} and {second} both reversed")]
    DuplicateReversal { first: Seat, second: Seat },

    #[error("{tricks} tricks for seat {seat} is outside 0..={max}")]
    TrickOutOfRange { seat: Seat, tricks: u8, max: u8 },

    #[error("tricks total {total} but {expected} cards were dealt")]
    TrickSumMismatch { total: u32, expected: u8 },

    #[error("no round to undo")]
    NothingToUndo,

    #[error("expected {expected:?} phase, session is in {actual:?}")]
    PhaseMismatch { expected: Phase, actual: Phase },

    #[error("expected one entry per seat ({expected}), got {actual}")]
    SeatCountMismatch { expected: usize, actual: usize },

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn invalid_configuration(detail: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidConfiguration { .. } => ErrorCode::InvalidConfiguration,
            DomainError::TooFewActivePlayers { .. } => ErrorCode::TooFewActivePlayers,
            DomainError::BidOutOfRange { .. } => ErrorCode::BidOutOfRange,
            DomainError::BudgetExceeded { .. } => ErrorCode::BudgetExceeded,
            DomainError::DuplicateReversal { .. } => ErrorCode::DuplicateReversal,
            DomainError::TrickOutOfRange { .. } => ErrorCode::TrickOutOfRange,
            DomainError::TrickSumMismatch { .. } => ErrorCode::TrickSumMismatch,
            DomainError::NothingToUndo => ErrorCode::NothingToUndo,
            DomainError::PhaseMismatch { .. } => ErrorCode::PhaseMismatch,
            DomainError::SeatCountMismatch { .. } => ErrorCode::SeatCountMismatch,
            DomainError::Invariant(_) => ErrorCode::DataCorruption,
        }
    }

    /// The seat the error is about, when there is one.
    pub fn seat(&self) -> Option<Seat> {
        match self {
            DomainError::BidOutOfRange { seat, .. }
            | DomainError::BudgetExceeded { seat, .. }
            | DomainError::TrickOutOfRange { seat, .. } => Some(*seat),
            DomainError::DuplicateReversal { second, .. } => Some(*second),
            _ => None,
        }
    }
}
