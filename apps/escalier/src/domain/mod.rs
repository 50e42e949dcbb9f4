//! Domain layer: the round state machine and scoring engine.

pub mod bidding;
pub mod end_game;
pub mod ledger;
pub mod rules;
pub mod seats;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tricks;
pub mod undo;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_end_game;
#[cfg(test)]
mod tests_props_undo;
#[cfg(test)]
mod tests_snapshot_phases;

// Re-exports for ergonomics
pub use bidding::SeatOptions;
pub use end_game::Standing;
pub use ledger::Player;
pub use rules::{round_card_sequence, score_delta};
pub use seats::compute_bid_order;
pub use session::GameSession;
pub use snapshot::{PhaseSnapshot, SessionSnapshot};
pub use state::{
    actions_from_parts, AbandonBudget, Direction, Entry, GameOptions, Half, Phase, Reversal,
    ReversalCost, RoundRecord, Seat, SeatAction,
};
pub use tricks::RoundScores;
