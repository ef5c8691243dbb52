//! Property tests for undo and the target law.

use proptest::prelude::*;

use crate::domain::commands::apply;
use crate::domain::lifecycle::{end_innings, open_second_innings, select_lineup, Lineup};
use crate::domain::roster::Side;
use crate::domain::scoring::record_run;
use crate::domain::test_state_helpers::{match_in_progress, settle_pending};
use crate::domain::undo::undo_last;
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A delivery followed by undo restores the exact prior state.
    #[test]
    fn prop_undo_round_trips(
        prefix in test_gens::deliveries(60),
        last in test_gens::delivery(),
    ) {
        let mut state = match_in_progress();
        for cmd in &prefix {
            let _ = apply(&mut state, cmd);
            settle_pending(&mut state);
        }
        let before = state.clone();
        let Ok(update) = apply(&mut state, &last) else {
            return Ok(());
        };
        // A wicket suppressed on a free hit records nothing to take back.
        prop_assume!(update.delivery.is_some());

        let undone = undo_last(&mut state).unwrap();
        prop_assert_eq!(undone.delivery, update.delivery);
        prop_assert_eq!(&state, &before);
    }

    /// Undoing everything returns the innings to its opening state.
    #[test]
    fn prop_undo_all_restores_innings_start(
        commands in test_gens::deliveries(40),
    ) {
        let start = match_in_progress();
        let mut state = start.clone();
        for cmd in &commands {
            let _ = apply(&mut state, cmd);
            settle_pending(&mut state);
        }
        while state.undo_depth() > 0 {
            undo_last(&mut state).unwrap();
        }
        prop_assert_eq!(&state.play, &start.play);
        prop_assert!(state.ledger.is_empty());
        // Nothing left to take back.
        prop_assert!(undo_last(&mut state).unwrap().delivery.is_none());
    }

    /// First-innings score S sets a target of S + 1; reaching it in the
    /// chase completes the match for the side batting second.
    #[test]
    fn prop_target_law(
        commands in test_gens::deliveries(60),
    ) {
        let mut state = match_in_progress();
        for cmd in &commands {
            let _ = apply(&mut state, cmd);
            settle_pending(&mut state);
        }
        let first_score = state.batting_team().score;
        end_innings(&mut state).unwrap();
        prop_assert_eq!(state.play.target, first_score + 1);

        open_second_innings(&mut state).unwrap();
        select_lineup(&mut state, Lineup { striker: 21, non_striker: 22, bowler: 8 }).unwrap();
        while !state.is_completed() {
            record_run(&mut state, 6).unwrap();
            settle_pending(&mut state);
        }
        prop_assert!(state.batting_team().score >= state.play.target);
        let result = state.result().unwrap();
        prop_assert_eq!(result.winning_side, Side::Team2);
        prop_assert_eq!(result.margin_value, 10);
    }
}
