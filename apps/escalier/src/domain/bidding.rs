use serde::{Deserialize, Serialize};

use crate::domain::rules::{valid_bid_range, MIN_ACTIVE_PLAYERS};
use crate::domain::session::GameSession;
use crate::domain::state::{Half, Phase, Reversal, RoundRecord, Seat, SeatAction};
use crate::errors::domain::DomainError;

/// What a seat can afford in the current bidding phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatOptions {
    pub seat: Seat,
    pub abandons_left: u8,
    pub can_abandon: bool,
    pub can_reverse: bool,
    pub can_reverse_and_abandon: bool,
}

impl GameSession {
    pub fn seat_options(&self, seat: Seat) -> Option<SeatOptions> {
        let player = self.player(seat)?;
        let abandons_left =
            player.abandons_left(self.current_half(), self.options.abandon_budget);
        Some(SeatOptions {
            seat,
            abandons_left,
            can_abandon: abandons_left >= SeatAction::Abandon.abandon_charge(),
            can_reverse: abandons_left >= SeatAction::Reverse(0).abandon_charge(),
            can_reverse_and_abandon: abandons_left
                >= SeatAction::ReverseAndAbandon.abandon_charge(),
        })
    }

    /// Commit the bidding phase of the current round.
    ///
    /// `actions` holds one entry per seat. On success the round record is
    /// appended and the session moves to [`Phase::Tricks`].
    pub fn submit_bids(&mut self, actions: &[SeatAction]) -> Result<&RoundRecord, DomainError> {
        self.require_phase(Phase::Bidding)?;
        let card_count = self.require_card_count("submit_bids")?;
        self.require_seat_count(actions.len())?;

        let abandoned = actions.iter().filter(|a| a.is_abandon()).count() as u8;
        let active = self.num_players - abandoned;
        let required = MIN_ACTIVE_PLAYERS.min(self.num_players);
        if active < required {
            return Err(DomainError::TooFewActivePlayers { active, required });
        }

        let bid_range = valid_bid_range(card_count);
        for (seat, action) in actions.iter().enumerate() {
            if let Some(bid) = action.bid() {
                if !bid_range.contains(&bid) {
                    return Err(DomainError::BidOutOfRange {
                        seat: seat as Seat,
                        bid,
                        max: card_count,
                    });
                }
            }
        }

        let reversal = find_reversal(actions)?;
        let half = self.current_half();
        for (seat, action) in actions.iter().enumerate() {
            let required = action.abandon_charge();
            if required == 0 {
                continue;
            }
            let remaining =
                self.players[seat].abandons_left(half, self.options.abandon_budget);
            if required > remaining {
                return Err(DomainError::BudgetExceeded {
                    seat: seat as Seat,
                    required,
                    remaining,
                });
            }
        }

        let record = RoundRecord {
            round_no: (self.current_round_index + 1) as u8,
            card_count,
            dealer: self.current_dealer,
            dealer_name: self.dealer_name().to_owned(),
            bids: actions.iter().map(|a| a.entry()).collect(),
            reversal,
            tricks: Vec::new(),
            score_delta: Vec::new(),
        };
        self.apply_bidding_charges(&record, half);
        self.round_history.push(record);
        self.current_phase = Phase::Tricks;

        self.round_history
            .last()
            .ok_or_else(|| DomainError::invariant("round record missing after commit"))
    }

    pub(crate) fn apply_bidding_charges(&mut self, record: &RoundRecord, half: Half) {
        if let Some(reversal) = record.reversal {
            self.players[reversal.seat as usize].reversals_used += 1;
            self.direction = self.direction.flipped();
        }
        for seat in 0..self.num_players {
            let units = record.abandon_charge(seat);
            if units > 0 {
                self.players[seat as usize].charge_abandons(half, units);
            }
        }
    }

    /// Inverse of [`GameSession::apply_bidding_charges`]. `half` must be the
    /// half of the round the record belongs to.
    pub(crate) fn refund_bidding_charges(
        &mut self,
        record: &RoundRecord,
        half: Half,
    ) -> Result<(), DomainError> {
        if let Some(reversal) = record.reversal {
            self.player_mut(reversal.seat)?.refund_reversal()?;
            self.direction = self.direction.flipped();
        }
        for seat in 0..self.num_players {
            let units = record.abandon_charge(seat);
            if units > 0 {
                self.player_mut(seat)?.refund_abandons(half, units)?;
            }
        }
        Ok(())
    }
}

fn find_reversal(actions: &[SeatAction]) -> Result<Option<Reversal>, DomainError> {
    let mut found: Option<Reversal> = None;
    for (seat, action) in actions.iter().enumerate() {
        let Some(cost) = action.reversal_cost() else {
            continue;
        };
        if let Some(first) = found {
            return Err(DomainError::DuplicateReversal {
                first: first.seat,
                second: seat as Seat,
            });
        }
        found = Some(Reversal {
            seat: seat as Seat,
            cost,
        });
    }
    Ok(found)
}
