use crate::domain::bowling::{
    available_bowlers, end_over_early, keep_current_bowler, select_new_bowler,
};
use crate::domain::events::MatchEvent;
use crate::domain::roster::Role;
use crate::domain::scoring::record_run;
use crate::domain::state::PendingInput;
use crate::domain::test_state_helpers::match_in_progress;
use crate::errors::domain::ValidationKind;

fn bowl_over(state: &mut crate::domain::state::MatchState) {
    for _ in 0..6 {
        record_run(state, 0).unwrap();
    }
}

#[test]
fn candidates_exclude_the_bowler_who_just_finished() {
    let mut state = match_in_progress();
    bowl_over(&mut state);
    let ids: Vec<_> = available_bowlers(&state).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![27, 29, 30, 31]);
}

#[test]
fn new_bowler_starts_with_clean_figures() {
    let mut state = match_in_progress();
    record_run(&mut state, 4).unwrap();
    for _ in 0..5 {
        record_run(&mut state, 0).unwrap();
    }

    let update = select_new_bowler(&mut state, 29).unwrap();
    assert_eq!(
        update.events,
        vec![MatchEvent::BowlerChanged {
            bowler: "Tigers 9".into()
        }]
    );
    let bowler = state.play.bowler.as_ref().unwrap();
    assert_eq!(bowler.id, 29);
    assert_eq!(bowler.balls_bowled, 0);
    assert_eq!(bowler.runs_conceded, 0);
    assert!(state.play.pending.is_empty());
}

#[test]
fn ineligible_bowlers_are_rejected() {
    let mut state = match_in_progress();
    bowl_over(&mut state);
    // Same bowler, a batsman, and a player from the batting side.
    for id in [28, 21, 9] {
        let err = select_new_bowler(&mut state, id).unwrap_err();
        assert_eq!(err.kind(), &ValidationKind::InvalidSelection, "id {id}");
    }
    assert!(state.is_awaiting(PendingInput::AwaitingNewBowler));
}

#[test]
fn bowling_change_only_when_due() {
    let mut state = match_in_progress();
    assert_eq!(
        select_new_bowler(&mut state, 29).unwrap_err().kind(),
        &ValidationKind::InvalidSelection
    );
    assert_eq!(
        keep_current_bowler(&mut state).unwrap_err().kind(),
        &ValidationKind::InvalidSelection
    );
}

#[test]
fn keeping_the_bowler_carries_figures_over() {
    let mut state = match_in_progress();
    bowl_over(&mut state);
    keep_current_bowler(&mut state).unwrap();
    let bowler = state.play.bowler.as_ref().unwrap();
    assert_eq!(bowler.id, 28);
    assert_eq!(bowler.balls_bowled, 6);
    record_run(&mut state, 1).unwrap();
}

#[test]
fn lone_bowler_continues_without_blocking() {
    let mut state = match_in_progress();
    for p in state.sheets[1].players.iter_mut() {
        if p.id != 28 {
            p.role = Role::Batsman;
        }
    }
    let mut events = Vec::new();
    for _ in 0..6 {
        events.extend(record_run(&mut state, 0).unwrap().events);
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, MatchEvent::BowlerContinues { bowler } if bowler == "Tigers 8")));
    assert!(state.play.pending.is_empty());
    record_run(&mut state, 0).unwrap();
}

#[test]
fn over_can_be_ended_early_after_one_ball() {
    let mut state = match_in_progress();
    assert_eq!(
        end_over_early(&mut state).unwrap_err().kind(),
        &ValidationKind::InvalidSelection
    );

    record_run(&mut state, 0).unwrap();
    record_run(&mut state, 0).unwrap();
    let update = end_over_early(&mut state).unwrap();
    assert!(update.has_event(|e| matches!(e, MatchEvent::OverCompleted { overs: 1, .. })));
    assert_eq!(state.batting_team().overs, 1);
    assert_eq!(state.batting_team().balls_in_current_over, 0);
    assert!(state.is_awaiting(PendingInput::AwaitingNewBowler));
}
