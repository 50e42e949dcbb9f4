use std::ops::RangeInclusive;

/// Player counts a session can be started with.
pub const SUPPORTED_PLAYERS: RangeInclusive<u8> = 2..=8;

/// At least this many players must take part in every round.
pub const MIN_ACTIVE_PLAYERS: u8 = 2;

/// Abandons needed to qualify for the end-game bonus (5 per half).
pub const BONUS_ABANDONS: u8 = 10;

/// Peak hand size: 10 cards up to five players, 8 cards above.
pub fn max_cards_for(num_players: u8) -> u8 {
    if num_players <= 5 {
        10
    } else {
        8
    }
}

// Hand-size schedule: 1 → max, then max → 1. Both peak rounds deal `max` cards;
// the first belongs to the ascent, the second to the descent.
pub fn round_card_sequence(num_players: u8) -> Vec<u8> {
    let max = max_cards_for(num_players);
    (1..=max).chain((1..=max).rev()).collect()
}

/// Last 0-based round index of the ascent.
pub fn peak_round_index(num_players: u8) -> usize {
    max_cards_for(num_players) as usize - 1
}

pub fn valid_bid_range(card_count: u8) -> RangeInclusive<u8> {
    0..=card_count
}

/// Round score for a player who took part.
///
/// A made contract is worth `5 + 5·tricks`; a broken one costs
/// `5 + 5·|bid − tricks|`.
pub fn score_delta(bid: u8, tricks: u8) -> i32 {
    if bid == tricks {
        5 + 5 * i32::from(tricks)
    } else {
        -(5 + 5 * i32::from(bid.abs_diff(tricks)))
    }
}

/// End-game bonus for a player who spent the full abandon allowance.
pub fn bonus_for_broken_contracts(contracts_broken: u32) -> i32 {
    match contracts_broken {
        0 => 60,
        1 => 30,
        2 => 15,
        _ => 0,
    }
}
