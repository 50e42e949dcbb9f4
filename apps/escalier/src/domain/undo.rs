//! Exact rollback of committed rounds.
//!
//! Everything is derived from the popped [`RoundRecord`]; nothing is
//! recomputed from the live session except which half the record's round
//! belongs to. Rollback runs on a copy that replaces the session only once
//! every refund has succeeded.

use crate::domain::session::GameSession;
use crate::domain::state::{Phase, RoundRecord};
use crate::errors::domain::DomainError;

impl GameSession {
    /// Roll back the last scored round, returning its record.
    ///
    /// Allowed in the bidding phase and after the game has ended; while
    /// tricks are being entered, cancel the open bids first with
    /// [`GameSession::cancel_bids`]. Undoing the final round also removes
    /// any end-game bonus.
    pub fn undo_last_round(&mut self) -> Result<RoundRecord, DomainError> {
        if self.current_round_index == 0 {
            return Err(DomainError::NothingToUndo);
        }
        if self.current_phase == Phase::Tricks {
            return Err(DomainError::PhaseMismatch {
                expected: Phase::Bidding,
                actual: Phase::Tricks,
            });
        }
        match self.round_history.last() {
            Some(record) if record.is_scored() => {}
            _ => return Err(DomainError::invariant("last round record is not scored")),
        }
        let mut staged = self.clone();
        let Some(record) = staged.round_history.pop() else {
            return Err(DomainError::NothingToUndo);
        };

        if staged.current_phase == Phase::GameOver {
            for player in &mut staged.players {
                player.revoke_bonus();
            }
        }

        let undone_index = staged.current_round_index - 1;
        let half = staged.half_for(undone_index);
        for (seat, player) in staged.players.iter_mut().enumerate() {
            player.revert_round(
                record.bids[seat],
                record.tricks[seat],
                record.score_delta[seat],
            )?;
        }
        staged.refund_bidding_charges(&record, half)?;

        // The deal only advances when another round follows, so the record's
        // dealer is the one to restore in both cases.
        staged.current_dealer = record.dealer;
        staged.current_round_index = undone_index;
        staged.current_phase = Phase::Bidding;

        *self = staged;
        Ok(record)
    }

    /// Withdraw the committed bids of the round whose tricks are being
    /// entered, returning the session to that round's bidding phase.
    pub fn cancel_bids(&mut self) -> Result<RoundRecord, DomainError> {
        self.require_phase(Phase::Tricks)?;
        match self.round_history.last() {
            Some(record) if !record.is_scored() => {}
            _ => return Err(DomainError::invariant("no open round record to cancel")),
        }
        let mut staged = self.clone();
        let Some(record) = staged.round_history.pop() else {
            return Err(DomainError::invariant("no open round record to cancel"));
        };

        let half = staged.current_half();
        staged.refund_bidding_charges(&record, half)?;
        staged.current_phase = Phase::Bidding;

        *self = staged;
        Ok(record)
    }
}
