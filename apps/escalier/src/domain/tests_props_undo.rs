//! Property tests for the commit/undo economy (pure domain).
//!
//! - Bids → tricks → undo restores the pre-bid session exactly.
//! - Bids → cancel restores the pre-bid session exactly.
//! - Budgets never exceed the allowance and every committed round keeps
//!   the trick total equal to the cards dealt.

use proptest::prelude::*;

use crate::domain::rules::score_delta;
use crate::domain::state::{AbandonBudget, Entry};
use crate::domain::test_gens::{game_dice, plan_round, round_dice};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::new_session;

fn budget() -> impl Strategy<Value = AbandonBudget> {
    prop_oneof![
        Just(AbandonBudget::None),
        Just(AbandonBudget::Single),
        Just(AbandonBudget::Triple),
        Just(AbandonBudget::Quintuple),
    ]
}

/// Player count, a prefix of rounds already played, then one more round.
fn scenario() -> impl Strategy<Value = (u8, AbandonBudget, bool, Vec<Vec<u32>>, Vec<u32>)> {
    (3u8..=8, budget(), any::<bool>()).prop_flat_map(|(n, budget, bonus)| {
        let rounds: usize = if n <= 5 { 20 } else { 16 };
        (
            Just(n),
            Just(budget),
            Just(bonus),
            (0..rounds).prop_flat_map(game_dice),
            round_dice(),
        )
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_undo_restores_pre_bid_state(
        (n, budget, bonus, history, last) in scenario(),
    ) {
        let mut session = new_session(n, budget, bonus);
        for dice in &history {
            let (actions, tricks) = plan_round(&session, dice);
            session.submit_bids(&actions).unwrap();
            session.submit_tricks(&tricks).unwrap();
        }

        let before = session.clone();
        let (actions, tricks) = plan_round(&session, &last);
        session.submit_bids(&actions).unwrap();
        session.submit_tricks(&tricks).unwrap();
        session.undo_last_round().unwrap();

        prop_assert_eq!(session, before);
    }

    #[test]
    fn prop_cancel_restores_pre_bid_state(
        (n, budget, bonus, history, last) in scenario(),
    ) {
        let mut session = new_session(n, budget, bonus);
        for dice in &history {
            let (actions, tricks) = plan_round(&session, dice);
            session.submit_bids(&actions).unwrap();
            session.submit_tricks(&tricks).unwrap();
        }

        let before = session.clone();
        let (actions, _) = plan_round(&session, &last);
        session.submit_bids(&actions).unwrap();
        session.cancel_bids().unwrap();

        prop_assert_eq!(session, before);
    }

    #[test]
    fn prop_committed_rounds_keep_invariants(
        (n, budget, bonus, history, _last) in scenario(),
    ) {
        let mut session = new_session(n, budget, bonus);
        let allowance = budget.allowance();
        for dice in &history {
            let (actions, tricks) = plan_round(&session, dice);
            let charged_before: Vec<u8> =
                session.players().iter().map(|p| p.total_abandons).collect();
            session.submit_bids(&actions).unwrap();
            for (seat, p) in session.players().iter().enumerate() {
                prop_assert_eq!(
                    p.total_abandons - charged_before[seat],
                    actions[seat].abandon_charge()
                );
            }
            let scores = session.submit_tricks(&tricks).unwrap();

            let record = session.round_history().last().unwrap();
            let total: u32 = record.active_seats().map(|s| u32::from(record.tricks[s as usize])).sum();
            prop_assert_eq!(total, u32::from(record.card_count));

            for (seat, bid) in record.bids.iter().enumerate() {
                let expected = match bid {
                    Entry::Count(b) => score_delta(*b, record.tricks[seat]),
                    Entry::Abandoned => 0,
                };
                prop_assert_eq!(scores.deltas[seat], expected);
            }
            for p in session.players() {
                prop_assert!(p.abandons_used_ascent <= allowance);
                prop_assert!(p.abandons_used_descent <= allowance);
            }
            prop_assert!(session.check_invariants().is_ok());
        }
    }

    /// Score law: made contracts earn at least 5, broken ones cost at least 5.
    #[test]
    fn prop_score_law(bid in 0u8..=10, tricks in 0u8..=10) {
        let delta = score_delta(bid, tricks);
        if bid == tricks {
            prop_assert_eq!(delta, 5 + 5 * i32::from(tricks));
            prop_assert!(delta >= 5);
        } else {
            prop_assert_eq!(delta, -(5 + 5 * i32::from(bid.abs_diff(tricks))));
            prop_assert!(delta <= -5);
        }
    }
}
