use crate::domain::snapshot::PhaseSnapshot;
use crate::domain::state::{AbandonBudget, Direction, Entry, SeatAction};
use crate::domain::test_state_helpers::{new_session, play_quiet_rounds, play_round};

use SeatAction::{Abandon, Play, Reverse};

#[test]
fn bidding_snapshot_lists_order_and_options() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    play_quiet_rounds(&mut session, 1);

    let snap = session.snapshot().unwrap();
    assert_eq!(snap.header.round_no, 2);
    assert_eq!(snap.header.total_rounds, 20);
    assert_eq!(snap.header.dealer, 0);
    assert_eq!(snap.header.dealer_name, "Noah");
    assert!(snap.header.can_undo);

    let PhaseSnapshot::Bidding(bidding) = snap.phase else {
        panic!("expected bidding snapshot");
    };
    assert_eq!(bidding.card_count, 2);
    assert_eq!(bidding.order, vec![1, 2, 3, 0]);
    assert_eq!(bidding.max_bid, 2);
    assert_eq!(bidding.seats.len(), 4);
    assert!(bidding.seats.iter().all(|s| s.abandons_left == 3));
}

#[test]
fn bidding_order_follows_a_reversal() {
    let mut session = new_session(4, AbandonBudget::Triple, false);
    play_round(&mut session, &[Play(1), Reverse(0), Play(0), Play(0)]);
    assert_eq!(session.direction(), Direction::CounterClockwise);

    let snap = session.snapshot().unwrap();
    let PhaseSnapshot::Bidding(bidding) = snap.phase else {
        panic!("expected bidding snapshot");
    };
    // Dealer is seat 0; seat 1 still speaks first, then the table runs backwards.
    assert_eq!(bidding.order, vec![1, 0, 3, 2]);
    assert_eq!(bidding.seats[1].abandons_left, 1);
}

#[test]
fn tricks_snapshot_reads_committed_bids() {
    let mut session = new_session(4, AbandonBudget::Single, false);
    session
        .submit_bids(&[Play(1), Abandon, Play(0), Play(0)])
        .unwrap();

    let snap = session.snapshot().unwrap();
    assert!(!snap.header.can_undo);
    let PhaseSnapshot::Tricks(tricks) = snap.phase else {
        panic!("expected tricks snapshot");
    };
    assert_eq!(tricks.card_count, 1);
    assert_eq!(
        tricks.bids,
        vec![Entry::Count(1), Entry::Abandoned, Entry::Count(0), Entry::Count(0)]
    );

    // A restored copy shows the same view.
    let json = serde_json::to_string(&session).unwrap();
    let restored: crate::domain::GameSession = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.snapshot().unwrap(), session.snapshot().unwrap());
}

#[test]
fn game_over_snapshot_carries_standings() {
    let mut session = new_session(2, AbandonBudget::None, false);
    play_quiet_rounds(&mut session, 20);
    let snap = session.snapshot().unwrap();
    let PhaseSnapshot::GameOver(standings) = snap.phase else {
        panic!("expected game over snapshot");
    };
    assert_eq!(standings.len(), 2);
    assert_eq!(snap.header.round_no, 21);
}

#[test]
fn snapshot_serializes_with_phase_tag() {
    let session = new_session(3, AbandonBudget::None, false);
    let value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
    assert_eq!(value["phase"]["phase"], "Bidding");
    assert_eq!(value["phase"]["data"]["card_count"], 1);
}
