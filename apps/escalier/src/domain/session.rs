//! The session aggregate and its lifecycle.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::ledger::Player;
use crate::domain::rules::{
    bonus_for_broken_contracts, peak_round_index, round_card_sequence, valid_bid_range,
    BONUS_ABANDONS, MIN_ACTIVE_PLAYERS, SUPPORTED_PLAYERS,
};
use crate::domain::seats::{compute_bid_order, next_seat};
use crate::domain::state::{
    Direction, Entry, GameOptions, Half, Phase, ReversalCost, RoundRecord, Seat,
};
use crate::errors::domain::DomainError;

/// Whole-game state, exclusively owned by one session.
///
/// Every public mutation validates fully before touching anything, so a
/// failed call leaves the session unchanged.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) num_players: u8,
    /// Index is the seat.
    pub(crate) players: Vec<Player>,
    pub(crate) round_card_sequence: Vec<u8>,
    pub(crate) peak_round_index: usize,
    pub(crate) current_round_index: usize,
    pub(crate) current_phase: Phase,
    pub(crate) current_dealer: Seat,
    pub(crate) direction: Direction,
    pub(crate) options: GameOptions,
    /// One record per committed bidding phase; the last one is unscored
    /// while the session is in [`Phase::Tricks`].
    pub(crate) round_history: Vec<RoundRecord>,
}

impl GameSession {
    /// Start a session. The last seat deals the first round.
    pub fn start_new_session<S: AsRef<str>>(
        num_players: u8,
        names: &[S],
        options: GameOptions,
    ) -> Result<Self, DomainError> {
        if !SUPPORTED_PLAYERS.contains(&num_players) {
            return Err(DomainError::invalid_configuration(format!(
                "{num_players} players not supported ({}..={})",
                SUPPORTED_PLAYERS.start(),
                SUPPORTED_PLAYERS.end()
            )));
        }
        if names.len() != num_players as usize {
            return Err(DomainError::invalid_configuration(format!(
                "expected {num_players} names, got {}",
                names.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut players = Vec::with_capacity(names.len());
        for (seat, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(DomainError::invalid_configuration(format!(
                    "seat {seat} has no name"
                )));
            }
            if !seen.insert(name) {
                return Err(DomainError::invalid_configuration(format!(
                    "name {name:?} is used twice"
                )));
            }
            players.push(Player::new(name));
        }

        Ok(Self {
            num_players,
            players,
            round_card_sequence: round_card_sequence(num_players),
            peak_round_index: peak_round_index(num_players),
            current_round_index: 0,
            current_phase: Phase::Bidding,
            current_dealer: num_players - 1,
            direction: Direction::Clockwise,
            options,
            round_history: Vec::new(),
        })
    }

    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat as usize)
    }

    pub(crate) fn player_mut(&mut self, seat: Seat) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(seat as usize)
            .ok_or_else(|| DomainError::invariant(format!("no player at seat {seat}")))
    }

    pub fn round_card_sequence(&self) -> &[u8] {
        &self.round_card_sequence
    }

    pub fn total_rounds(&self) -> usize {
        self.round_card_sequence.len()
    }

    pub fn peak_round_index(&self) -> usize {
        self.peak_round_index
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round_index
    }

    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    pub fn current_dealer(&self) -> Seat {
        self.current_dealer
    }

    pub fn dealer_name(&self) -> &str {
        self.players
            .get(self.current_dealer as usize)
            .map_or("", |p| p.name.as_str())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn round_history(&self) -> &[RoundRecord] {
        &self.round_history
    }

    /// Cards dealt in the current round; `None` once the session is complete.
    pub fn current_card_count(&self) -> Option<u8> {
        self.round_card_sequence
            .get(self.current_round_index)
            .copied()
    }

    pub fn is_ascent_phase(&self, round_index: usize) -> bool {
        round_index <= self.peak_round_index
    }

    pub fn half_for(&self, round_index: usize) -> Half {
        if self.is_ascent_phase(round_index) {
            Half::Ascent
        } else {
            Half::Descent
        }
    }

    pub fn current_half(&self) -> Half {
        self.half_for(self.current_round_index)
    }

    /// Move the deal to the next seat. Called when a new round's bidding opens.
    pub fn advance_dealer(&mut self) {
        self.current_dealer = next_seat(self.current_dealer, self.num_players);
    }

    pub fn is_session_complete(&self) -> bool {
        self.current_round_index >= self.round_card_sequence.len()
    }

    /// Bidding order for the current dealer and direction.
    pub fn bid_order(&self) -> Vec<Seat> {
        compute_bid_order(self.current_dealer, self.num_players, self.direction)
    }

    pub(crate) fn require_phase(&self, expected: Phase) -> Result<(), DomainError> {
        if self.current_phase != expected {
            return Err(DomainError::PhaseMismatch {
                expected,
                actual: self.current_phase,
            });
        }
        Ok(())
    }

    pub(crate) fn require_card_count(&self, ctx: &'static str) -> Result<u8, DomainError> {
        self.current_card_count().ok_or_else(|| {
            DomainError::invariant(format!("round index past the last round ({ctx})"))
        })
    }

    pub(crate) fn require_seat_count(&self, actual: usize) -> Result<(), DomainError> {
        let expected = self.num_players as usize;
        if actual != expected {
            return Err(DomainError::SeatCountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Check the invariants of a session, typically one restored from
    /// storage. Every running total must match what the round records add
    /// up to, so undo can always reverse them.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let n = self.num_players as usize;
        if !SUPPORTED_PLAYERS.contains(&self.num_players) || self.players.len() != n {
            return Err(DomainError::invariant("player count"));
        }
        if self.round_card_sequence != round_card_sequence(self.num_players)
            || self.peak_round_index != peak_round_index(self.num_players)
        {
            return Err(DomainError::invariant("round sequence"));
        }
        if self.current_dealer as usize >= n {
            return Err(DomainError::invariant("dealer seat"));
        }
        if self.current_round_index > self.total_rounds() {
            return Err(DomainError::invariant("round index"));
        }

        let expected_records = match self.current_phase {
            Phase::Bidding if !self.is_session_complete() => self.current_round_index,
            Phase::Tricks if !self.is_session_complete() => self.current_round_index + 1,
            Phase::GameOver if self.is_session_complete() => self.current_round_index,
            _ => return Err(DomainError::invariant("phase does not match round index")),
        };
        if self.round_history.len() != expected_records {
            return Err(DomainError::invariant("round history length"));
        }

        for (index, record) in self.round_history.iter().enumerate() {
            check_record(self, index, record)?;
        }

        let budget = self.options.abandon_budget.allowance();
        for player in &self.players {
            if player.bid_history.len() != self.current_round_index
                || player.trick_history.len() != self.current_round_index
            {
                return Err(DomainError::invariant(format!(
                    "history length for {}",
                    player.name
                )));
            }
            if player.abandons_used_ascent > budget || player.abandons_used_descent > budget {
                return Err(DomainError::invariant(format!(
                    "abandon budget for {}",
                    player.name
                )));
            }
            if player.total_abandons != player.abandons_used_ascent + player.abandons_used_descent
            {
                return Err(DomainError::invariant(format!(
                    "abandon total for {}",
                    player.name
                )));
            }
        }

        let mut reversals = 0usize;
        for seat in 0..self.num_players {
            let expected = self.replay_ledger(seat)?;
            reversals += usize::from(expected.reversals_used);
            if self.players[seat as usize] != expected {
                return Err(DomainError::invariant(format!(
                    "ledger for {} does not match the round history",
                    expected.name
                )));
            }
        }
        let direction = if reversals % 2 == 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        if self.direction != direction {
            return Err(DomainError::invariant("direction"));
        }
        Ok(())
    }

    /// Rebuild one player's ledger from the round records alone.
    fn replay_ledger(&self, seat: Seat) -> Result<Player, DomainError> {
        let current = self.player(seat).ok_or_else(|| DomainError::invariant("player count"))?;
        let mut player = Player::new(current.name.clone());

        for (index, record) in self.round_history.iter().enumerate() {
            let units = record.abandon_charge(seat);
            if units > 0 {
                player.charge_abandons(self.half_for(index), units);
            }
            if record.holds_reversal(seat) {
                player.reversals_used += 1;
            }
            if !record.is_scored() {
                continue;
            }
            let bid = record.bids[seat as usize];
            let delta = player.record_round(bid, record.tricks[seat as usize]);
            if record.score_delta[seat as usize] != delta {
                return Err(DomainError::invariant(format!(
                    "round {}: score change for {}",
                    index + 1,
                    player.name
                )));
            }
        }

        if self.current_phase == Phase::GameOver
            && self.options.bonus_enabled
            && player.total_abandons == BONUS_ABANDONS
        {
            player.award_bonus(bonus_for_broken_contracts(player.contracts_broken));
        }
        Ok(player)
    }
}

fn check_record(
    session: &GameSession,
    index: usize,
    record: &RoundRecord,
) -> Result<(), DomainError> {
    let n = session.num_players as usize;
    let scored = index < session.current_round_index;
    let bad = |what: &str| DomainError::invariant(format!("round {}: {what}", index + 1));

    if record.round_no as usize != index + 1
        || Some(&record.card_count) != session.round_card_sequence.get(index)
    {
        return Err(bad("numbering"));
    }
    if record.bids.len() != n || record.dealer as usize >= n {
        return Err(bad("seats"));
    }
    if record.dealer_name != session.players[record.dealer as usize].name {
        return Err(bad("dealer name"));
    }
    if let Some(reversal) = record.reversal {
        let Some(entry) = record.bids.get(reversal.seat as usize) else {
            return Err(bad("reversal seat"));
        };
        if entry.is_abandoned() != (reversal.cost == ReversalCost::Three) {
            return Err(bad("reversal cost"));
        }
    }
    let bid_range = valid_bid_range(record.card_count);
    if record
        .bids
        .iter()
        .any(|entry| matches!(entry, Entry::Count(bid) if !bid_range.contains(bid)))
    {
        return Err(bad("bid out of range"));
    }
    if record.active_seats().count() < usize::from(MIN_ACTIVE_PLAYERS).min(n) {
        return Err(bad("too few active seats"));
    }
    if record.is_scored() != scored {
        return Err(bad("scored state"));
    }
    if !scored {
        return Ok(());
    }
    if record.tricks.len() != n || record.score_delta.len() != n {
        return Err(bad("tricks"));
    }
    let mut total: u32 = 0;
    for (seat, entry) in record.bids.iter().enumerate() {
        let tricks = record.tricks[seat];
        if entry.is_abandoned() && tricks != 0 {
            return Err(bad("abandoned seat took tricks"));
        }
        if !entry.is_abandoned() {
            total += u32::from(tricks);
        }
    }
    if total != u32::from(record.card_count) {
        return Err(bad("trick total"));
    }
    Ok(())
}
