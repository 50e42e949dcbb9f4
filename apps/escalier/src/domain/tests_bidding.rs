use crate::domain::state::{
    AbandonBudget, Direction, Entry, Phase, Reversal, ReversalCost, SeatAction,
};
use crate::domain::test_state_helpers::{new_session, play_quiet_rounds, plays};
use crate::errors::domain::DomainError;

use SeatAction::{Abandon, Play, Reverse, ReverseAndAbandon};

#[test]
fn bids_commit_and_open_tricks_phase() {
    let mut session = new_session(4, AbandonBudget::None, false);
    let record = session.submit_bids(&plays(&[1, 0, 0, 0])).unwrap().clone();

    assert_eq!(record.round_no, 1);
    assert_eq!(record.card_count, 1);
    assert_eq!(record.dealer, 3);
    assert_eq!(record.dealer_name, "Nao");
    assert_eq!(
        record.bids,
        vec![Entry::Count(1), Entry::Count(0), Entry::Count(0), Entry::Count(0)]
    );
    assert_eq!(record.reversal, None);
    assert!(!record.is_scored());
    assert_eq!(session.current_phase(), Phase::Tricks);
    assert_eq!(session.round_history().len(), 1);
}

#[test]
fn too_few_active_players_is_checked_first() {
    let mut session = new_session(3, AbandonBudget::Triple, false);
    let before = session.clone();
    // Also out of range, but the active-player rule wins.
    let err = session
        .submit_bids(&[Abandon, Abandon, Play(9)])
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::TooFewActivePlayers {
            active: 1,
            required: 2
        }
    );
    assert_eq!(session, before);
}

#[test]
fn two_player_tables_cannot_abandon() {
    let mut session = new_session(2, AbandonBudget::Quintuple, false);
    let err = session.submit_bids(&[Abandon, Play(1)]).unwrap_err();
    assert!(matches!(err, DomainError::TooFewActivePlayers { active: 1, .. }));
    session.submit_bids(&[Play(1), Play(0)]).unwrap();
}

#[test]
fn bid_above_card_count_is_rejected_with_seat() {
    let mut session = new_session(4, AbandonBudget::None, false);
    play_quiet_rounds(&mut session, 2);
    // Round 3 deals 3 cards.
    let before = session.clone();
    let err = session.submit_bids(&plays(&[0, 1, 4, 0])).unwrap_err();
    assert_eq!(
        err,
        DomainError::BidOutOfRange {
            seat: 2,
            bid: 4,
            max: 3
        }
    );
    assert_eq!(session, before);
}

#[test]
fn reverse_bid_is_range_checked_too() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    let err = session
        .submit_bids(&[Play(0), Reverse(2), Play(0), Play(0)])
        .unwrap_err();
    assert!(matches!(err, DomainError::BidOutOfRange { seat: 1, .. }));
}

#[test]
fn abandon_without_budget_is_rejected() {
    let mut session = new_session(4, AbandonBudget::None, false);
    let err = session
        .submit_bids(&[Play(1), Abandon, Play(0), Play(0)])
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::BudgetExceeded {
            seat: 1,
            required: 1,
            remaining: 0
        }
    );
}

#[test]
fn reversal_needs_its_full_cost() {
    let mut session = new_session(4, AbandonBudget::Single, false);
    let err = session
        .submit_bids(&[Reverse(1), Play(0), Play(0), Play(0)])
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::BudgetExceeded {
            seat: 0,
            required: 2,
            remaining: 1
        }
    );

    let mut session = new_session(4, AbandonBudget::Triple, false);
    play_round_with(&mut session, &[Abandon, Play(1), Play(0), Play(0)]);
    let err = session
        .submit_bids(&[ReverseAndAbandon, Play(1), Play(1), Play(0)])
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::BudgetExceeded {
            seat: 0,
            required: 3,
            remaining: 2
        }
    );
}

#[test]
fn only_one_reversal_per_round() {
    let mut session = new_session(4, AbandonBudget::Quintuple, false);
    let before = session.clone();
    let err = session
        .submit_bids(&[Reverse(0), Play(0), ReverseAndAbandon, Play(1)])
        .unwrap_err();
    assert_eq!(err, DomainError::DuplicateReversal { first: 0, second: 2 });
    assert_eq!(session, before);
}

#[test]
fn cost_two_reversal_flips_direction_and_charges_two() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    let record = session
        .submit_bids(&[Play(0), Reverse(1), Play(0), Play(0)])
        .unwrap()
        .clone();

    assert_eq!(
        record.reversal,
        Some(Reversal {
            seat: 1,
            cost: ReversalCost::Two
        })
    );
    assert_eq!(record.bids[1], Entry::Count(1));
    assert_eq!(session.direction(), Direction::CounterClockwise);
    let p = &session.players()[1];
    assert_eq!(p.reversals_used, 1);
    assert_eq!(p.abandons_used_ascent, 2);
    assert_eq!(p.total_abandons, 2);
}

#[test]
fn cost_three_reversal_charges_three_not_four() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    session
        .submit_bids(&[ReverseAndAbandon, Play(1), Play(0), Play(0)])
        .unwrap();

    let p = &session.players()[0];
    assert_eq!(p.abandons_used_ascent, 3);
    assert_eq!(p.total_abandons, 3);
    assert_eq!(p.reversals_used, 1);
    assert_eq!(session.round_history()[0].bids[0], Entry::Abandoned);
    assert_eq!(session.direction(), Direction::CounterClockwise);
}

#[test]
fn descent_rounds_charge_the_descent_budget() {
    let mut session = new_session(4, AbandonBudget::Single, false);
    play_quiet_rounds(&mut session, 10);
    assert_eq!(session.current_round_index(), 10);
    assert_eq!(session.current_card_count(), Some(10));

    session
        .submit_bids(&[Play(0), Play(0), Abandon, Play(10)])
        .unwrap();
    let p = &session.players()[2];
    assert_eq!(p.abandons_used_ascent, 0);
    assert_eq!(p.abandons_used_descent, 1);
}

#[test]
fn wrong_seat_count_is_rejected() {
    let mut session = new_session(4, AbandonBudget::None, false);
    let err = session.submit_bids(&plays(&[0, 0, 1])).unwrap_err();
    assert_eq!(
        err,
        DomainError::SeatCountMismatch {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn bids_twice_is_a_phase_error() {
    let mut session = new_session(3, AbandonBudget::None, false);
    session.submit_bids(&plays(&[1, 0, 0])).unwrap();
    let err = session.submit_bids(&plays(&[1, 0, 0])).unwrap_err();
    assert_eq!(
        err,
        DomainError::PhaseMismatch {
            expected: Phase::Bidding,
            actual: Phase::Tricks
        }
    );
}

#[test]
fn seat_options_follow_remaining_budget() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    let opts = session.seat_options(0).unwrap();
    assert_eq!(opts.abandons_left, 3);
    assert!(opts.can_abandon && opts.can_reverse && opts.can_reverse_and_abandon);

    play_round_with(&mut session, &[Abandon, Play(1), Play(0), Play(0)]);
    let opts = session.seat_options(0).unwrap();
    assert_eq!(opts.abandons_left, 2);
    assert!(opts.can_reverse);
    assert!(!opts.can_reverse_and_abandon);

    assert!(session.seat_options(4).is_none());

    let session = new_session(4, AbandonBudget::None, false);
    let opts = session.seat_options(2).unwrap();
    assert!(!opts.can_abandon && !opts.can_reverse);
}

fn play_round_with(session: &mut crate::domain::GameSession, actions: &[SeatAction]) {
    crate::domain::test_state_helpers::play_round(session, actions);
}
