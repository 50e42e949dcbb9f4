// Proptest generators for rounds.
//
// A round is planned from a vector of random dice so that every generated
// plan is valid for the session it is applied to: budgets, the single
// reversal, the minimum number of active players, and the trick total are
// respected by construction rather than filtered.

use proptest::prelude::*;

use crate::domain::rules::MIN_ACTIVE_PLAYERS;
use crate::domain::session::GameSession;
use crate::domain::state::SeatAction;

pub const DICE_PER_ROUND: usize = 48;

/// Dice for one round.
pub fn round_dice() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), DICE_PER_ROUND)
}

/// Dice for `rounds` rounds.
pub fn game_dice(rounds: usize) -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(round_dice(), rounds)
}

include!("test_plan_round.rs");
