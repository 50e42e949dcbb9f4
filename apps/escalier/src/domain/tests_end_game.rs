use crate::domain::state::{AbandonBudget, Phase, SeatAction};
use crate::domain::test_state_helpers::{new_session, play_round};
use crate::domain::GameSession;
use crate::errors::domain::DomainError;

use SeatAction::{Abandon, Play};

/// Four players, five abandons per half. Seat 0 sits out the first five
/// rounds of each half and breaks its contract in the first `broken` rounds
/// it plays; seat 1 bids and takes every card.
fn play_full_abandon_game(bonus: bool, broken: usize) -> GameSession {
    let mut session = new_session(4, AbandonBudget::Quintuple, bonus);
    let mut played = 0;
    for round in 0..session.total_rounds() {
        let cards = session.current_card_count().unwrap();
        let half_start = if session.is_ascent_phase(round) { 0 } else { 10 };
        let seat_zero = if round - half_start < 5 {
            Abandon
        } else {
            played += 1;
            if played <= broken {
                Play(1)
            } else {
                Play(0)
            }
        };
        session
            .submit_bids(&[seat_zero, Play(cards), Play(0), Play(0)])
            .unwrap();
        session.submit_tricks(&[0, cards, 0, 0]).unwrap();
    }
    session
}

#[test]
fn full_abandon_bonus_with_one_broken_contract() {
    let session = play_full_abandon_game(true, 1);
    assert_eq!(session.current_phase(), Phase::GameOver);

    let p = &session.players()[0];
    assert_eq!(p.abandons_used_ascent, 5);
    assert_eq!(p.abandons_used_descent, 5);
    assert_eq!(p.total_abandons, 10);
    assert_eq!(p.contracts_broken, 1);
    assert_eq!(p.bonus_points, 30);
    assert_eq!(session.players()[1].bonus_points, 0);

    let standings = session.evaluate_end_game().unwrap();
    let seat0 = standings.iter().find(|s| s.seat == 0).unwrap();
    assert_eq!(seat0.bonus, 30);
    assert_eq!(seat0.final_score, p.score);
}

#[test]
fn bonus_scale_by_broken_contracts() {
    for (broken, expected) in [(0usize, 60), (2, 15), (3, 0), (10, 0)] {
        let session = play_full_abandon_game(true, broken);
        let p = &session.players()[0];
        assert_eq!(p.contracts_broken as usize, broken);
        assert_eq!(p.bonus_points, expected, "broken = {broken}");
    }
}

#[test]
fn bonus_is_added_to_the_score() {
    let with = play_full_abandon_game(true, 0);
    let without = play_full_abandon_game(false, 0);
    assert_eq!(with.players()[0].score, without.players()[0].score + 60);
    assert_eq!(without.players()[0].bonus_points, 0);
}

#[test]
fn undoing_the_final_round_revokes_the_bonus() {
    let mut session = play_full_abandon_game(true, 0);
    let with_bonus = session.players()[0].score;
    assert_eq!(session.players()[0].bonus_points, 60);

    let record = session.undo_last_round().unwrap();
    let p = &session.players()[0];
    assert_eq!(p.bonus_points, 0);
    assert_eq!(p.score, with_bonus - 60 - record.score_delta[0]);
    assert_eq!(session.current_phase(), Phase::Bidding);
    session.check_invariants().unwrap();
}

#[test]
fn standings_are_stable_on_ties() {
    let mut session = new_session(4, AbandonBudget::None, false);
    // Seat 0 takes the only trick: seats 0, 1 and 3 break for -10, seat 2 makes 5.
    play_round(&mut session, &[Play(0), Play(1), Play(0), Play(1)]);
    let standings = session.standings();
    let order: Vec<u8> = standings.iter().map(|s| s.seat).collect();
    assert_eq!(order, vec![2, 0, 1, 3]);
    assert_eq!(standings[0].place, 1);
    assert_eq!(standings[0].final_score, 5);
    assert_eq!(standings[3].place, 4);
}

#[test]
fn evaluate_end_game_requires_a_finished_session() {
    let session = new_session(3, AbandonBudget::None, false);
    assert!(matches!(
        session.evaluate_end_game(),
        Err(DomainError::PhaseMismatch {
            expected: Phase::GameOver,
            ..
        })
    ));
}
