//! Read-only phase views for the input layer.
//!
//! A view is rebuilt from the session alone. The tricks view reads the bids
//! from the open round record, so a restored session shows the same inputs
//! without recomputing turn order.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::SeatOptions;
use crate::domain::end_game::Standing;
use crate::domain::session::GameSession;
use crate::domain::state::{Direction, Entry, Phase, Reversal, Seat};
use crate::errors::domain::DomainError;

/// Facts shown in every phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    /// 1-based; equals `total_rounds + 1` once the game is over.
    pub round_no: usize,
    pub total_rounds: usize,
    pub dealer: Seat,
    pub dealer_name: String,
    pub direction: Direction,
    pub names: Vec<String>,
    pub scores: Vec<i32>,
    pub can_undo: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub header: SessionHeader,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    Bidding(BiddingSnapshot),
    Tricks(TricksSnapshot),
    GameOver(Vec<Standing>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddingSnapshot {
    pub card_count: u8,
    /// Seats in bidding order; the first one speaks first.
    pub order: Vec<Seat>,
    pub min_bid: u8,
    pub max_bid: u8,
    /// Indexed by seat.
    pub seats: Vec<SeatOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TricksSnapshot {
    pub card_count: u8,
    /// Committed bids, indexed by seat.
    pub bids: Vec<Entry>,
    pub reversal: Option<Reversal>,
}

impl GameSession {
    pub fn snapshot(&self) -> Result<SessionSnapshot, DomainError> {
        let header = SessionHeader {
            round_no: self.current_round_index + 1,
            total_rounds: self.total_rounds(),
            dealer: self.current_dealer,
            dealer_name: self.dealer_name().to_owned(),
            direction: self.direction,
            names: self.players.iter().map(|p| p.name.clone()).collect(),
            scores: self.players.iter().map(|p| p.score).collect(),
            can_undo: self.current_round_index > 0 && self.current_phase != Phase::Tricks,
        };

        let phase = match self.current_phase {
            Phase::Bidding => {
                let card_count = self.require_card_count("snapshot")?;
                let seats = (0..self.num_players)
                    .filter_map(|seat| self.seat_options(seat))
                    .collect();
                PhaseSnapshot::Bidding(BiddingSnapshot {
                    card_count,
                    order: self.bid_order(),
                    min_bid: 0,
                    max_bid: card_count,
                    seats,
                })
            }
            Phase::Tricks => {
                let record = self
                    .round_history
                    .get(self.current_round_index)
                    .ok_or_else(|| DomainError::invariant("tricks phase without round record"))?;
                PhaseSnapshot::Tricks(TricksSnapshot {
                    card_count: record.card_count,
                    bids: record.bids.clone(),
                    reversal: record.reversal,
                })
            }
            Phase::GameOver => PhaseSnapshot::GameOver(self.standings()),
        };

        Ok(SessionSnapshot { header, phase })
    }
}
