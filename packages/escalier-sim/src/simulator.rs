//! Scripted session player.
//!
//! Drives a complete session through the scorekeeper service with one
//! [`Profile`] per seat. Every submitted round is valid, so any rejection is
//! a bug in the core and aborts the game.

use escalier::domain::{GameOptions, GameSession, SeatAction};
use escalier::report::{self, ContractsRow, FinalStandingRow, ScoreSeries};
use escalier::services::{AppError, Scorekeeper};
use escalier::store::MemoryStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::Profile;

/// Chance per round that a seat asks for the reversal when it can afford it.
const REVERSAL_RATE: f64 = 0.05;

/// Result of simulating a complete session.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub standings: Vec<FinalStandingRow>,
    pub score_evolution: Vec<ScoreSeries>,
    pub contracts: Vec<ContractsRow>,
    pub rounds_played: usize,
    pub reversals: usize,
}

pub struct Simulator {
    rng: StdRng,
    profiles: Vec<Profile>,
}

impl Simulator {
    pub fn new(seed: u64, profiles: Vec<Profile>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            profiles,
        }
    }

    pub fn simulate_game(
        mut self,
        names: &[String],
        options: GameOptions,
    ) -> Result<GameResult, SimulatorError> {
        let num_players = u8::try_from(names.len())
            .map_err(|_| SimulatorError::InvalidSetup(format!("{} players", names.len())))?;
        if self.profiles.len() != names.len() {
            return Err(SimulatorError::InvalidSetup(format!(
                "{} profiles for {} players",
                self.profiles.len(),
                names.len()
            )));
        }

        let mut keeper = Scorekeeper::new(MemoryStore::new());
        keeper.start(num_players, names, options)?;

        let mut reversals = 0;
        while let Some(session) = keeper.session().filter(|s| !s.is_session_complete()) {
            let cards = session
                .current_card_count()
                .ok_or_else(|| SimulatorError::InvalidState("no cards for round".into()))?;
            let actions = self.plan_bids(session, cards);
            reversals += usize::from(actions.iter().any(|a| a.reversal_cost().is_some()));

            keeper.submit_bids(&actions)?;
            let tricks = self.plan_tricks(&actions, cards);
            debug!(cards, ?actions, ?tricks, "Round planned");
            keeper.submit_tricks(&tricks)?;
        }

        let session = keeper.session().ok_or(AppError::NoActiveSession)?;
        Ok(GameResult {
            standings: report::final_standings_rows(session),
            score_evolution: report::score_evolution(session),
            contracts: report::contracts_summary(session),
            rounds_played: session.current_round_index(),
            reversals,
        })
    }

    fn plan_bids(&mut self, session: &GameSession, cards: u8) -> Vec<SeatAction> {
        let n = session.num_players();
        let mut actions = Vec::with_capacity(n as usize);
        let mut sitting_out = 0u8;
        let mut reversal_taken = false;

        for seat in 0..n {
            let profile = self.profiles[seat as usize];
            let Some(options) = session.seat_options(seat) else {
                actions.push(SeatAction::Play(0));
                continue;
            };

            // At least two players stay in.
            let room = n - sitting_out > 2;
            let abandon =
                room && options.can_abandon && self.rng.random_bool(profile.abandon_rate());
            let bid = self.decide_bid(profile, cards);
            let reverse = !reversal_taken && self.rng.random_bool(REVERSAL_RATE);

            let action = match (abandon, reverse) {
                (true, true) if options.can_reverse_and_abandon => SeatAction::ReverseAndAbandon,
                (true, _) => SeatAction::Abandon,
                (false, true) if options.can_reverse => SeatAction::Reverse(bid),
                (false, _) => SeatAction::Play(bid),
            };
            sitting_out += u8::from(action.is_abandon());
            reversal_taken |= action.reversal_cost().is_some();
            actions.push(action);
        }
        actions
    }

    fn decide_bid(&mut self, profile: Profile, cards: u8) -> u8 {
        match profile {
            Profile::Perfect => cards / 2,
            Profile::Abandoner => self.rng.random_range(0..=cards.min(1)),
            Profile::Steady | Profile::Erratic => self.rng.random_range(0..=cards),
        }
    }

    fn plan_tricks(&mut self, actions: &[SeatAction], cards: u8) -> Vec<u8> {
        let mut tricks: Vec<u8> = actions
            .iter()
            .enumerate()
            .map(|(seat, action)| match action.bid() {
                None => 0,
                Some(bid) => {
                    let profile = self.profiles[seat];
                    if self.rng.random_bool(profile.miss_rate()) {
                        miss(bid, cards)
                    } else {
                        bid
                    }
                }
            })
            .collect();
        let active: Vec<usize> = (0..actions.len())
            .filter(|&seat| !actions[seat].is_abandon())
            .collect();
        balance_tricks(&mut tricks, &active, cards);
        tricks
    }
}

/// A trick count different from `bid` within `0..=cards`.
fn miss(bid: u8, cards: u8) -> u8 {
    (bid + 1) % (cards + 1)
}

/// Shift the planned counts so they add up to `cards`, starting from the
/// last active seat and walking backwards. Each count stays in `0..=cards`.
pub fn balance_tricks(tricks: &mut [u8], active: &[usize], cards: u8) {
    let total: i32 = active.iter().map(|&seat| i32::from(tricks[seat])).sum();
    let mut diff = i32::from(cards) - total;
    for &seat in active.iter().rev() {
        if diff == 0 {
            break;
        }
        let old = i32::from(tricks[seat]);
        let new = (old + diff).clamp(0, i32::from(cards));
        diff -= new - old;
        tricks[seat] = new as u8;
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// The core rejected a scripted round
    Rejected(AppError),
    /// Player or profile setup is unusable
    InvalidSetup(String),
    /// Session reached a state the script cannot handle
    InvalidState(String),
}

impl From<AppError> for SimulatorError {
    fn from(err: AppError) -> Self {
        SimulatorError::Rejected(err)
    }
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Rejected(err) => write!(f, "Rejected ({}): {err}", err.code()),
            SimulatorError::InvalidSetup(msg) => write!(f, "Invalid setup: {msg}"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
