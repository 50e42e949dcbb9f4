//! Read-only tables and series derived from a session, for export and charts.
//!
//! Nothing here mutates the session; rows are plain serde structs so the
//! caller can write them as CSV or JSON.

use serde::{Deserialize, Serialize};

use crate::domain::session::GameSession;
use crate::domain::state::Entry;

/// Marker shown in place of a bid for a seat that sat the round out.
pub const ABANDON_MARK: &str = "A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStandingRow {
    pub place: usize,
    pub name: String,
    pub score: i32,
    pub contracts_made: u32,
    pub contracts_broken: u32,
    pub abandons: u8,
    pub reversals: u8,
    pub bonus: i32,
}

/// One line per player per scored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRow {
    pub round_no: u8,
    pub card_count: u8,
    pub dealer: String,
    pub player: String,
    /// Bid, or [`ABANDON_MARK`].
    pub bid: String,
    pub tricks: u8,
    pub delta: i32,
    /// `"<name> (cost <n>)"` on every row of a round with a reversal, else empty.
    /// The cost is the one charged, so a reversal on an abandoned seat reads
    /// `cost 3`.
    pub reversal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSeries {
    pub name: String,
    /// Cumulative score after each scored round; the last point includes
    /// the end-game bonus.
    pub points: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsRow {
    pub name: String,
    pub made: u32,
    pub broken: u32,
}

/// Standings with per-player statistics, best score first.
pub fn final_standings_rows(session: &GameSession) -> Vec<FinalStandingRow> {
    session
        .standings()
        .into_iter()
        .filter_map(|standing| {
            let player = session.player(standing.seat)?;
            Some(FinalStandingRow {
                place: standing.place,
                name: standing.name,
                score: standing.final_score,
                contracts_made: player.contracts_made,
                contracts_broken: player.contracts_broken,
                abandons: player.total_abandons,
                reversals: player.reversals_used,
                bonus: standing.bonus,
            })
        })
        .collect()
}

pub fn round_rows(session: &GameSession) -> Vec<RoundRow> {
    let players = session.players();
    let mut rows = Vec::new();
    for record in session.round_history().iter().filter(|r| r.is_scored()) {
        let reversal = record
            .reversal
            .and_then(|r| {
                let name = &players.get(r.seat as usize)?.name;
                Some(format!("{name} (cost {})", r.cost.units()))
            })
            .unwrap_or_default();

        for (seat, player) in players.iter().enumerate() {
            let bid = match record.bids.get(seat) {
                Some(Entry::Count(bid)) => bid.to_string(),
                Some(Entry::Abandoned) => ABANDON_MARK.to_owned(),
                None => String::new(),
            };
            rows.push(RoundRow {
                round_no: record.round_no,
                card_count: record.card_count,
                dealer: record.dealer_name.clone(),
                player: player.name.clone(),
                bid,
                tricks: record.tricks.get(seat).copied().unwrap_or(0),
                delta: record.score_delta.get(seat).copied().unwrap_or(0),
                reversal: reversal.clone(),
            });
        }
    }
    rows
}

pub fn score_evolution(session: &GameSession) -> Vec<ScoreSeries> {
    let scored: Vec<_> = session
        .round_history()
        .iter()
        .filter(|r| r.is_scored())
        .collect();

    session
        .players()
        .iter()
        .enumerate()
        .map(|(seat, player)| {
            let mut running = 0;
            let mut points: Vec<i32> = scored
                .iter()
                .map(|record| {
                    running += record.score_delta.get(seat).copied().unwrap_or(0);
                    running
                })
                .collect();
            if let Some(last) = points.last_mut() {
                *last += player.bonus_points;
            }
            ScoreSeries {
                name: player.name.clone(),
                points,
            }
        })
        .collect()
}

/// Made and broken contracts per player, in seat order.
pub fn contracts_summary(session: &GameSession) -> Vec<ContractsRow> {
    session
        .players()
        .iter()
        .map(|p| ContractsRow {
            name: p.name.clone(),
            made: p.contracts_made,
            broken: p.contracts_broken,
        })
        .collect()
}
