use serde::{Deserialize, Serialize};

use crate::domain::session::GameSession;
use crate::domain::state::{Phase, Seat};
use crate::errors::domain::DomainError;

/// Outcome of scoring a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScores {
    pub round_no: u8,
    pub card_count: u8,
    /// Score change per seat.
    pub deltas: Vec<i32>,
    /// The round was the last one; end-game bonuses have been applied.
    pub game_over: bool,
}

impl GameSession {
    /// Score the current round from per-seat trick counts.
    ///
    /// Abandoned seats must report 0. On success the session either moves
    /// to the next round's bidding (with the deal advanced) or ends.
    pub fn submit_tricks(&mut self, tricks: &[u8]) -> Result<RoundScores, DomainError> {
        self.require_phase(Phase::Tricks)?;
        let card_count = self.require_card_count("submit_tricks")?;
        self.require_seat_count(tricks.len())?;

        let bids = match self.round_history.get(self.current_round_index) {
            Some(record) if !record.is_scored() => record.bids.clone(),
            _ => {
                return Err(DomainError::invariant(
                    "tricks phase without an open round record",
                ))
            }
        };

        let mut total: u32 = 0;
        for (seat, (&count, bid)) in tricks.iter().zip(&bids).enumerate() {
            let max = if bid.is_abandoned() { 0 } else { card_count };
            if count > max {
                return Err(DomainError::TrickOutOfRange {
                    seat: seat as Seat,
                    tricks: count,
                    max,
                });
            }
            total += u32::from(count);
        }
        if total != u32::from(card_count) {
            return Err(DomainError::TrickSumMismatch {
                total,
                expected: card_count,
            });
        }

        let deltas: Vec<i32> = self
            .players
            .iter_mut()
            .zip(bids.iter().zip(tricks))
            .map(|(player, (&bid, &count))| player.record_round(bid, count))
            .collect();

        let round_no = (self.current_round_index + 1) as u8;
        if let Some(record) = self.round_history.get_mut(self.current_round_index) {
            record.tricks = tricks.to_vec();
            record.score_delta = deltas.clone();
        }

        self.current_round_index += 1;
        let game_over = self.is_session_complete();
        if game_over {
            self.current_phase = Phase::GameOver;
            self.apply_end_game_bonus();
        } else {
            self.advance_dealer();
            self.current_phase = Phase::Bidding;
        }

        Ok(RoundScores {
            round_no,
            card_count,
            deltas,
            game_over,
        })
    }
}
