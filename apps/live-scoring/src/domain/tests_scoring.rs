use crate::domain::events::MatchEvent;
use crate::domain::ledger::ExtraType;
use crate::domain::rules::ExtraKind;
use crate::domain::scoring::{record_extra, record_run, record_wicket};
use crate::domain::state::PendingInput;
use crate::domain::test_state_helpers::{match_in_progress, settle_pending, striker_id};
use crate::errors::domain::ValidationKind;

#[test]
fn boundary_then_single_rotates_strike() {
    let mut state = match_in_progress();
    assert_eq!(striker_id(&state), 1);

    let four = record_run(&mut state, 4).unwrap();
    assert!(four.has_event(|e| matches!(e, MatchEvent::Boundary { runs: 4, .. })));
    assert_eq!(striker_id(&state), 1);

    let single = record_run(&mut state, 1).unwrap();
    assert!(single.has_event(|e| matches!(e, MatchEvent::StrikeSwapped)));
    assert_eq!(striker_id(&state), 2);

    let opener = &state.play.batsmen[0];
    assert_eq!(opener.runs, 5);
    assert_eq!(opener.fours, 1);
    assert_eq!(opener.sixes, 0);
    assert_eq!(opener.balls_faced, 2);
    assert_eq!(state.batting_team().balls_in_current_over, 2);
    assert_eq!(state.batting_team().score, 5);
    assert_eq!(state.play.bowler.as_ref().unwrap().runs_conceded, 5);
}

#[test]
fn ledger_entry_names_the_batsman_who_faced() {
    let mut state = match_in_progress();
    let update = record_run(&mut state, 3).unwrap();
    let delivery = update.delivery.unwrap();
    assert_eq!(delivery.batsman_name, "Lions 1");
    assert_eq!(delivery.bowler_name, "Tigers 8");
    assert_eq!(delivery.resulting_score.to_string(), "3/0");
    assert_eq!(delivery.over_ball(), "0.1");
    assert!(delivery.is_legal);
    assert_eq!(state.ledger.len(), 1);
}

#[test]
fn runs_outside_range_are_rejected_without_change() {
    let mut state = match_in_progress();
    let before = state.clone();
    let err = record_run(&mut state, 7).unwrap_err();
    assert_eq!(err.kind(), &ValidationKind::InvalidRuns);
    assert_eq!(state, before);
}

#[test]
fn scoring_without_a_striker_fails() {
    let mut state = match_in_progress();
    for b in state.play.batsmen.iter_mut() {
        b.is_on_strike = false;
    }
    let before = state.clone();
    for result in [
        record_run(&mut state, 1),
        record_extra(&mut state, ExtraKind::Wide),
        record_wicket(&mut state),
    ] {
        assert_eq!(result.unwrap_err().kind(), &ValidationKind::NoStriker);
    }
    assert_eq!(state, before);
}

#[test]
fn scoring_after_completion_fails() {
    let mut state = match_in_progress();
    state.play.match_completed = true;
    assert_eq!(
        record_run(&mut state, 1).unwrap_err().kind(),
        &ValidationKind::MatchCompleted
    );
    assert_eq!(
        record_extra(&mut state, ExtraKind::Bye).unwrap_err().kind(),
        &ValidationKind::MatchCompleted
    );
    assert_eq!(
        record_wicket(&mut state).unwrap_err().kind(),
        &ValidationKind::MatchCompleted
    );
}

#[test]
fn wide_is_charged_to_bowler_and_bowled_again() {
    let mut state = match_in_progress();
    let update = record_extra(&mut state, ExtraKind::Wide).unwrap();
    let delivery = update.delivery.unwrap();
    assert_eq!(delivery.extra_type, ExtraType::Wide);
    assert!(!delivery.is_legal);

    assert_eq!(state.batting_team().score, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 0);
    let bowler = state.play.bowler.as_ref().unwrap();
    assert_eq!(bowler.runs_conceded, 1);
    assert_eq!(bowler.balls_bowled, 0);
    assert_eq!(state.play.batsmen[0].runs, 0);
    assert!(!state.play.is_free_hit);
}

#[test]
fn bye_counts_and_credits_the_striker() {
    let mut state = match_in_progress();
    record_extra(&mut state, ExtraKind::Bye).unwrap();
    assert_eq!(state.batting_team().score, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 1);
    assert_eq!(state.play.batsmen[0].runs, 1);
    assert_eq!(state.play.batsmen[0].balls_faced, 1);
    assert_eq!(state.play.bowler.as_ref().unwrap().runs_conceded, 0);
    // Extras never change ends.
    assert_eq!(striker_id(&state), 1);
}

#[test]
fn leg_bye_counts_but_credits_nobody() {
    let mut state = match_in_progress();
    record_extra(&mut state, ExtraKind::LegBye).unwrap();
    assert_eq!(state.batting_team().score, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 1);
    assert_eq!(state.play.batsmen[0].runs, 0);
    assert_eq!(state.play.batsmen[0].balls_faced, 0);
    assert_eq!(state.play.bowler.as_ref().unwrap().runs_conceded, 0);
    assert_eq!(state.play.bowler.as_ref().unwrap().balls_bowled, 1);
}

#[test]
fn no_ball_awards_a_free_hit_that_the_next_run_consumes() {
    let mut state = match_in_progress();
    let update = record_extra(&mut state, ExtraKind::NoBall).unwrap();
    assert!(update.has_event(|e| matches!(e, MatchEvent::FreeHitAwarded)));
    assert!(state.play.is_free_hit);
    assert_eq!(state.batting_team().balls_in_current_over, 0);

    let update = record_run(&mut state, 2).unwrap();
    assert!(update.has_event(|e| matches!(e, MatchEvent::FreeHitConsumed)));
    assert!(update.delivery.as_ref().unwrap().free_hit);
    assert!(!state.play.is_free_hit);
    // The free-hit run itself is not counted toward the over.
    assert_eq!(state.batting_team().balls_in_current_over, 0);
    assert_eq!(state.play.batsmen[0].runs, 2);
    assert_eq!(state.play.batsmen[0].balls_faced, 0);
}

#[test]
fn pending_free_hit_makes_a_wide_count() {
    let mut state = match_in_progress();
    record_extra(&mut state, ExtraKind::NoBall).unwrap();
    let update = record_extra(&mut state, ExtraKind::Wide).unwrap();
    assert!(update.delivery.unwrap().is_legal);
    assert_eq!(state.batting_team().balls_in_current_over, 1);
    assert!(!state.play.is_free_hit);
}

#[test]
fn wicket_on_free_hit_is_suppressed() {
    let mut state = match_in_progress();
    record_extra(&mut state, ExtraKind::NoBall).unwrap();
    let before = state.clone();

    let update = record_wicket(&mut state).unwrap();
    assert!(update.delivery.is_none());
    assert_eq!(update.events, vec![MatchEvent::WicketSuppressedOnFreeHit]);
    assert_eq!(state, before);
    assert_eq!(state.batting_team().wickets, 0);
}

#[test]
fn wicket_dismisses_striker_and_blocks_until_replaced() {
    let mut state = match_in_progress();
    let update = record_wicket(&mut state).unwrap();
    assert!(update.delivery.as_ref().unwrap().is_wicket);

    assert_eq!(state.batting_team().wickets, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 1);
    let bowler = state.play.bowler.as_ref().unwrap();
    assert_eq!(bowler.wickets_taken, 1);
    assert_eq!(bowler.balls_bowled, 1);
    let out = &state.play.batsmen[0];
    assert!(out.is_out);
    assert!(!out.is_on_strike);
    assert_eq!(state.play.pending, vec![PendingInput::AwaitingNewBatsman]);
    assert!(state.striker().is_none());

    let err = record_run(&mut state, 1).unwrap_err();
    assert_eq!(err.kind(), &ValidationKind::NoStriker);

    settle_pending(&mut state);
    assert_eq!(striker_id(&state), 3);
    record_run(&mut state, 1).unwrap();
}

#[test]
fn deliveries_wait_for_a_bowling_change() {
    let mut state = match_in_progress();
    for _ in 0..6 {
        record_run(&mut state, 0).unwrap();
    }
    assert!(state.is_awaiting(PendingInput::AwaitingNewBowler));
    let err = record_run(&mut state, 0).unwrap_err();
    assert_eq!(err.kind(), &ValidationKind::AwaitingInput);
}

#[test]
fn six_legal_balls_complete_the_over() {
    let mut state = match_in_progress();
    for _ in 0..5 {
        record_run(&mut state, 0).unwrap();
    }
    let update = record_run(&mut state, 2).unwrap();
    assert!(update.has_event(|e| matches!(e, MatchEvent::OverCompleted { overs: 1, .. })));
    assert_eq!(update.delivery.unwrap().over_ball(), "0.6");

    let team = state.batting_team();
    assert_eq!(team.overs, 1);
    assert_eq!(team.balls_in_current_over, 0);
    // Even runs keep strike, the change of ends swaps it.
    assert_eq!(striker_id(&state), 2);
}

#[test]
fn free_hit_on_the_last_ball_holds_the_over_open() {
    let mut state = match_in_progress();
    for _ in 0..5 {
        record_run(&mut state, 0).unwrap();
    }
    record_extra(&mut state, ExtraKind::NoBall).unwrap();
    record_extra(&mut state, ExtraKind::NoBall).unwrap();
    // Sixth ball counted through the free hit, but another free hit is due.
    assert_eq!(state.batting_team().balls_in_current_over, 6);
    assert_eq!(state.batting_team().overs, 0);

    record_run(&mut state, 1).unwrap();
    assert_eq!(state.batting_team().overs, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 0);
    assert!(!state.play.is_free_hit);
}

#[test]
fn three_wickets_in_a_row_by_one_bowler_is_a_hat_trick() {
    let mut state = match_in_progress();
    record_run(&mut state, 1).unwrap();

    let first = record_wicket(&mut state).unwrap();
    assert!(!first.delivery.as_ref().unwrap().hat_trick);
    settle_pending(&mut state);
    let second = record_wicket(&mut state).unwrap();
    assert!(!second.delivery.as_ref().unwrap().hat_trick);
    settle_pending(&mut state);
    let third = record_wicket(&mut state).unwrap();
    assert!(third.delivery.as_ref().unwrap().hat_trick);
    assert!(third.has_event(|e| matches!(e, MatchEvent::HatTrick { .. })));
}

#[test]
fn tenth_wicket_closes_the_innings() {
    let mut state = match_in_progress();
    let mut last = None;
    for _ in 0..10 {
        settle_pending(&mut state);
        last = Some(record_wicket(&mut state).unwrap());
    }
    let last = last.unwrap();
    assert!(last.has_event(|e| matches!(e, MatchEvent::AllOut { score: 0, .. })));
    assert_eq!(state.batting_team().wickets, 10);
    assert_eq!(state.play.pending, vec![PendingInput::InningsClosing]);
    assert_eq!(
        record_run(&mut state, 1).unwrap_err().kind(),
        &ValidationKind::NoStriker
    );
}
