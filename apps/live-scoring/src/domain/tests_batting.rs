use crate::domain::batting::{available_batsmen, select_new_batsman, swap_strike};
use crate::domain::events::MatchEvent;
use crate::domain::scoring::{record_run, record_wicket};
use crate::domain::state::PendingInput;
use crate::domain::test_state_helpers::{match_in_progress, striker_id};
use crate::errors::domain::ValidationKind;

#[test]
fn manual_swap_toggles_strike() {
    let mut state = match_in_progress();
    let update = swap_strike(&mut state).unwrap();
    assert_eq!(update.events, vec![MatchEvent::StrikeSwapped]);
    assert_eq!(striker_id(&state), 2);
    swap_strike(&mut state).unwrap();
    assert_eq!(striker_id(&state), 1);
}

#[test]
fn swap_is_a_noop_with_one_batsman_left() {
    let mut state = match_in_progress();
    record_wicket(&mut state).unwrap();
    let before = state.clone();
    let update = swap_strike(&mut state).unwrap();
    assert!(update.events.is_empty());
    assert_eq!(state, before);
}

#[test]
fn new_batsman_enters_on_strike() {
    let mut state = match_in_progress();
    record_run(&mut state, 1).unwrap();
    // Lions 2 on strike, dismissed; Lions 1 waits at the other end.
    record_wicket(&mut state).unwrap();

    let update = select_new_batsman(&mut state, 7).unwrap();
    assert_eq!(
        update.events,
        vec![MatchEvent::NewBatsman {
            name: "Lions 7".into()
        }]
    );
    assert_eq!(striker_id(&state), 7);
    assert_eq!(state.not_out_batsmen().filter(|b| b.is_on_strike).count(), 1);
    assert!(!state.is_awaiting(PendingInput::AwaitingNewBatsman));
}

#[test]
fn dismissed_and_current_batsmen_cannot_be_selected() {
    let mut state = match_in_progress();
    record_wicket(&mut state).unwrap();

    for id in [1, 2, 25] {
        let err = select_new_batsman(&mut state, id).unwrap_err();
        assert_eq!(err.kind(), &ValidationKind::InvalidSelection, "id {id}");
    }
    assert!(!available_batsmen(&state).iter().any(|p| p.id == 1));
    assert_eq!(available_batsmen(&state).len(), 9);
}

#[test]
fn selection_requires_a_vacancy() {
    let mut state = match_in_progress();
    let err = select_new_batsman(&mut state, 3).unwrap_err();
    assert_eq!(err.kind(), &ValidationKind::InvalidSelection);
}

#[test]
fn no_candidates_left_reports_all_out() {
    let mut state = match_in_progress();
    state.sheets[0].players.truncate(2);
    record_wicket(&mut state).unwrap();
    assert_eq!(state.play.pending, vec![PendingInput::InningsClosing]);
    let err = select_new_batsman(&mut state, 3).unwrap_err();
    assert_eq!(err.kind(), &ValidationKind::AllOut);
}
