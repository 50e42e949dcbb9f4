//! Per-player running totals.
//!
//! Every mutation here has an inverse used by undo; each pair must cancel
//! out exactly.

use serde::{Deserialize, Serialize};

use crate::domain::rules::score_delta;
use crate::domain::state::{AbandonBudget, Entry, Half};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i32,
    pub contracts_made: u32,
    pub contracts_broken: u32,
    pub abandons_used_ascent: u8,
    pub abandons_used_descent: u8,
    /// Ascent plus descent usage, kept for the bonus check and display.
    pub total_abandons: u8,
    pub reversals_used: u8,
    /// Zero until the game ends.
    pub bonus_points: i32,
    pub bid_history: Vec<Entry>,
    pub trick_history: Vec<Entry>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            contracts_made: 0,
            contracts_broken: 0,
            abandons_used_ascent: 0,
            abandons_used_descent: 0,
            total_abandons: 0,
            reversals_used: 0,
            bonus_points: 0,
            bid_history: Vec::new(),
            trick_history: Vec::new(),
        }
    }

    pub fn abandons_used(&self, half: Half) -> u8 {
        match half {
            Half::Ascent => self.abandons_used_ascent,
            Half::Descent => self.abandons_used_descent,
        }
    }

    pub fn abandons_left(&self, half: Half, budget: AbandonBudget) -> u8 {
        budget.allowance().saturating_sub(self.abandons_used(half))
    }

    pub(crate) fn charge_abandons(&mut self, half: Half, units: u8) {
        match half {
            Half::Ascent => self.abandons_used_ascent += units,
            Half::Descent => self.abandons_used_descent += units,
        }
        self.total_abandons += units;
    }

    pub(crate) fn refund_abandons(&mut self, half: Half, units: u8) -> Result<(), DomainError> {
        let used = self.abandons_used(half).checked_sub(units);
        let total = self.total_abandons.checked_sub(units);
        let (Some(used), Some(total)) = (used, total) else {
            return Err(self.underflow("abandon refund"));
        };
        match half {
            Half::Ascent => self.abandons_used_ascent = used,
            Half::Descent => self.abandons_used_descent = used,
        }
        self.total_abandons = total;
        Ok(())
    }

    pub(crate) fn refund_reversal(&mut self) -> Result<(), DomainError> {
        self.reversals_used = self
            .reversals_used
            .checked_sub(1)
            .ok_or_else(|| self.underflow("reversal refund"))?;
        Ok(())
    }

    /// Score one round for this player and return the score change.
    ///
    /// `tricks` is ignored for an abandoned seat, which scores nothing.
    pub(crate) fn record_round(&mut self, bid: Entry, tricks: u8) -> i32 {
        let Entry::Count(bid) = bid else {
            self.bid_history.push(Entry::Abandoned);
            self.trick_history.push(Entry::Abandoned);
            return 0;
        };

        self.bid_history.push(Entry::Count(bid));
        self.trick_history.push(Entry::Count(tricks));
        if bid == tricks {
            self.contracts_made += 1;
        } else {
            self.contracts_broken += 1;
        }
        let delta = score_delta(bid, tricks);
        self.score += delta;
        delta
    }

    /// Inverse of [`Player::record_round`], driven by the stored round values.
    pub(crate) fn revert_round(
        &mut self,
        bid: Entry,
        tricks: u8,
        delta: i32,
    ) -> Result<(), DomainError> {
        if let Entry::Count(bid) = bid {
            let made = bid == tricks;
            let count = if made {
                self.contracts_made
            } else {
                self.contracts_broken
            };
            let left = count
                .checked_sub(1)
                .ok_or_else(|| self.underflow("contract count"))?;
            if made {
                self.contracts_made = left;
            } else {
                self.contracts_broken = left;
            }
        }
        self.score -= delta;
        self.bid_history.pop();
        self.trick_history.pop();
        Ok(())
    }

    pub(crate) fn award_bonus(&mut self, points: i32) {
        self.bonus_points = points;
        self.score += points;
    }

    pub(crate) fn revoke_bonus(&mut self) {
        self.score -= self.bonus_points;
        self.bonus_points = 0;
    }

    fn underflow(&self, what: &str) -> DomainError {
        DomainError::invariant(format!("{what} below zero for {}", self.name))
    }
}
