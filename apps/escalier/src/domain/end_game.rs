use serde::{Deserialize, Serialize};

use crate::domain::rules::{bonus_for_broken_contracts, BONUS_ABANDONS};
use crate::domain::session::GameSession;
use crate::domain::state::{Phase, Seat};
use crate::errors::domain::DomainError;

/// One line of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the ranking.
    pub place: usize,
    pub seat: Seat,
    pub name: String,
    pub final_score: i32,
    pub bonus: i32,
}

impl GameSession {
    /// Award end-game bonuses. Runs once, when the final round is scored.
    pub(crate) fn apply_end_game_bonus(&mut self) {
        if !self.options.bonus_enabled {
            return;
        }
        for player in &mut self.players {
            if player.total_abandons == BONUS_ABANDONS {
                player.award_bonus(bonus_for_broken_contracts(player.contracts_broken));
            }
        }
    }

    /// Players by score, highest first; ties keep seat order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut seats: Vec<usize> = (0..self.players.len()).collect();
        seats.sort_by(|&a, &b| self.players[b].score.cmp(&self.players[a].score));
        seats
            .into_iter()
            .enumerate()
            .map(|(i, seat)| {
                let player = &self.players[seat];
                Standing {
                    place: i + 1,
                    seat: seat as Seat,
                    name: player.name.clone(),
                    final_score: player.score,
                    bonus: player.bonus_points,
                }
            })
            .collect()
    }

    /// Final ranking. Only available once the last round is scored.
    pub fn evaluate_end_game(&self) -> Result<Vec<Standing>, DomainError> {
        self.require_phase(Phase::GameOver)?;
        Ok(self.standings())
    }
}
