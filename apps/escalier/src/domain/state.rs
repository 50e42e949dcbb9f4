use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Seat index, fixed for the whole session (0-based).
pub type Seat = u8;

/// Where the session is within the current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Collecting bids, abandons, and the optional reversal.
    Bidding,
    /// Bids committed; collecting trick counts.
    Tricks,
    /// Final round scored and end-game bonuses applied.
    GameOver,
}

/// Distribution direction. Reversed each time a reversal is committed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Half of the session a round belongs to. Each half has its own abandon budget.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Half {
    /// Hand size increasing, up to and including the first peak round.
    Ascent,
    /// Hand size decreasing, from the second peak round on.
    Descent,
}

/// Abandons each player may spend per half.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AbandonBudget {
    None,
    Single,
    Triple,
    Quintuple,
}

impl AbandonBudget {
    pub const fn allowance(self) -> u8 {
        match self {
            AbandonBudget::None => 0,
            AbandonBudget::Single => 1,
            AbandonBudget::Triple => 3,
            AbandonBudget::Quintuple => 5,
        }
    }
}

impl TryFrom<u8> for AbandonBudget {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AbandonBudget::None),
            1 => Ok(AbandonBudget::Single),
            3 => Ok(AbandonBudget::Triple),
            5 => Ok(AbandonBudget::Quintuple),
            other => Err(DomainError::invalid_configuration(format!(
                "abandon budget must be 0, 1, 3 or 5 (got {other})"
            ))),
        }
    }
}

impl From<AbandonBudget> for u8 {
    fn from(budget: AbandonBudget) -> Self {
        budget.allowance()
    }
}

/// Options chosen at session start.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameOptions {
    pub abandon_budget: AbandonBudget,
    /// End-game bonus for spending every abandon. Only reachable with
    /// [`AbandonBudget::Quintuple`].
    pub bonus_enabled: bool,
}

impl GameOptions {
    /// Build options; the bonus is dropped unless the budget is five per half.
    pub fn new(abandon_budget: AbandonBudget, bonus_enabled: bool) -> Self {
        Self {
            abandon_budget,
            bonus_enabled: bonus_enabled && abandon_budget == AbandonBudget::Quintuple,
        }
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::new(AbandonBudget::None, false)
    }
}

/// A bid or trick count, or the marker for a seat that sat the round out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Count(u8),
    Abandoned,
}

impl Entry {
    pub fn count(self) -> Option<u8> {
        match self {
            Entry::Count(n) => Some(n),
            Entry::Abandoned => None,
        }
    }

    pub fn is_abandoned(self) -> bool {
        matches!(self, Entry::Abandoned)
    }
}

/// Price of a reversal in abandons.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReversalCost {
    /// Standalone reversal; the player still bids.
    Two,
    /// Reversal bundled with an abandon; the abandon is included in the price.
    Three,
}

impl ReversalCost {
    pub const fn units(self) -> u8 {
        match self {
            ReversalCost::Two => 2,
            ReversalCost::Three => 3,
        }
    }
}

impl TryFrom<u8> for ReversalCost {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ReversalCost::Two),
            3 => Ok(ReversalCost::Three),
            other => Err(DomainError::invalid_configuration(format!(
                "reversal cost must be 2 or 3 (got {other})"
            ))),
        }
    }
}

impl From<ReversalCost> for u8 {
    fn from(cost: ReversalCost) -> Self {
        cost.units()
    }
}

/// The reversal committed in a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reversal {
    pub seat: Seat,
    pub cost: ReversalCost,
}

/// What a seat does in the bidding phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "bid", rename_all = "snake_case")]
pub enum SeatAction {
    Play(u8),
    Abandon,
    /// Cost-2 reversal; the seat still plays with this bid.
    Reverse(u8),
    /// Cost-3 reversal; the seat sits the round out.
    ReverseAndAbandon,
}

impl SeatAction {
    pub fn bid(self) -> Option<u8> {
        match self {
            SeatAction::Play(bid) | SeatAction::Reverse(bid) => Some(bid),
            SeatAction::Abandon | SeatAction::ReverseAndAbandon => None,
        }
    }

    pub fn is_abandon(self) -> bool {
        self.bid().is_none()
    }

    pub fn reversal_cost(self) -> Option<ReversalCost> {
        match self {
            SeatAction::Reverse(_) => Some(ReversalCost::Two),
            SeatAction::ReverseAndAbandon => Some(ReversalCost::Three),
            SeatAction::Play(_) | SeatAction::Abandon => None,
        }
    }

    /// Abandons this action takes out of the seat's budget for the half.
    pub fn abandon_charge(self) -> u8 {
        match self {
            SeatAction::Play(_) => 0,
            SeatAction::Abandon => 1,
            SeatAction::Reverse(_) => ReversalCost::Two.units(),
            SeatAction::ReverseAndAbandon => ReversalCost::Three.units(),
        }
    }

    pub fn entry(self) -> Entry {
        match self.bid() {
            Some(bid) => Entry::Count(bid),
            None => Entry::Abandoned,
        }
    }
}

/// Convert per-seat bids plus an optional reversal into seat actions.
///
/// A cost-3 reversal makes its seat abandoned whatever it bid. A cost-2
/// reversal on an abandoned seat becomes the cost-3 combo, so the seat is
/// charged 3 and never 4. That round is stored with [`ReversalCost::Three`],
/// which is what reports then print as the reversal cost.
pub fn actions_from_parts(
    bids: &[Entry],
    reversal: Option<Reversal>,
) -> Result<Vec<SeatAction>, DomainError> {
    let mut actions: Vec<SeatAction> = bids
        .iter()
        .map(|entry| match entry {
            Entry::Count(bid) => SeatAction::Play(*bid),
            Entry::Abandoned => SeatAction::Abandon,
        })
        .collect();

    if let Some(Reversal { seat, cost }) = reversal {
        let slot = actions
            .get_mut(seat as usize)
            .ok_or(DomainError::SeatCountMismatch {
                expected: bids.len(),
                actual: seat as usize + 1,
            })?;
        *slot = match (cost, *slot) {
            (ReversalCost::Two, SeatAction::Play(bid)) => SeatAction::Reverse(bid),
            _ => SeatAction::ReverseAndAbandon,
        };
    }

    Ok(actions)
}

/// One committed round. Bids and reversal are written when bidding commits;
/// tricks and score deltas when the round is scored. Indexed by seat.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round_no: u8,
    pub card_count: u8,
    pub dealer: Seat,
    pub dealer_name: String,
    pub bids: Vec<Entry>,
    pub reversal: Option<Reversal>,
    /// Empty until the round is scored; 0 for abandoned seats.
    pub tricks: Vec<u8>,
    /// Empty until the round is scored.
    pub score_delta: Vec<i32>,
}

impl RoundRecord {
    pub fn is_scored(&self) -> bool {
        !self.tricks.is_empty()
    }

    pub fn holds_reversal(&self, seat: Seat) -> bool {
        self.reversal.is_some_and(|r| r.seat == seat)
    }

    /// Seat sat out through the cost-3 combo, whose price already covers the abandon.
    pub fn is_reversal_combo(&self, seat: Seat) -> bool {
        self.reversal
            .is_some_and(|r| r.seat == seat && r.cost == ReversalCost::Three)
    }

    /// Abandons charged to `seat` when this round's bids committed.
    pub fn abandon_charge(&self, seat: Seat) -> u8 {
        let reversal = self
            .reversal
            .filter(|r| r.seat == seat)
            .map_or(0, |r| r.cost.units());
        let abandoned = self
            .bids
            .get(seat as usize)
            .is_some_and(|entry| entry.is_abandoned());
        let separate_abandon = u8::from(abandoned && !self.is_reversal_combo(seat));
        reversal + separate_abandon
    }

    pub fn active_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.bids
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_abandoned())
            .map(|(seat, _)| seat as Seat)
    }
}
