//! Seat and turn-order math for a table of `n` seats.
//!
//! Clockwise is increasing seat index; counter-clockwise is decreasing.

use crate::domain::state::{Direction, Seat};

#[inline]
pub fn seat_offset(seat: Seat, delta: i16, num_players: u8) -> Seat {
    (i16::from(seat) + delta).rem_euclid(i16::from(num_players)) as Seat
}

#[inline]
pub fn next_seat(seat: Seat, num_players: u8) -> Seat {
    seat_offset(seat, 1, num_players)
}

#[inline]
pub fn prev_seat(seat: Seat, num_players: u8) -> Seat {
    seat_offset(seat, -1, num_players)
}

/// First to bid: the seat after the dealer, whatever the direction.
#[inline]
pub fn first_bidder(dealer: Seat, num_players: u8) -> Seat {
    next_seat(dealer, num_players)
}

/// Bidding order for presentation. Scoring does not depend on it.
pub fn compute_bid_order(dealer: Seat, num_players: u8, direction: Direction) -> Vec<Seat> {
    let first = first_bidder(dealer, num_players);
    let step: i16 = match direction {
        Direction::Clockwise => 1,
        Direction::CounterClockwise => -1,
    };
    (0..i16::from(num_players))
        .map(|i| seat_offset(first, step * i, num_players))
        .collect()
}
