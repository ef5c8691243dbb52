//! Over completion and bowling changes.

use tracing::info;

use crate::domain::batting::rotate_strike;
use crate::domain::events::{MatchEvent, MatchUpdate};
use crate::domain::roster::{Player, PlayerId};
use crate::domain::state::{Bowler, MatchState, PendingInput};
use crate::errors::domain::{DomainError, ValidationKind};

/// Bowlers and all-rounders on the fielding side, minus whoever bowled the
/// last over.
pub fn available_bowlers(state: &MatchState) -> Vec<&Player> {
    let current = state.play.bowler.as_ref().map(|b| b.id);
    state
        .bowling_sheet()
        .bowlers()
        .filter(|p| Some(p.id) != current)
        .collect()
}

/// Close the over: bank it, clear any free hit, change ends, and ask for a
/// bowling change when one is possible.
pub(crate) fn close_over(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let team = state.batting_team_mut();
    team.overs += 1;
    team.balls_in_current_over = 0;
    let (overs, score, wickets) = (team.overs, team.score, team.wickets);
    state.play.is_free_hit = false;
    rotate_strike(&mut state.play.batsmen);

    info!(overs, score, wickets, "Over completed");
    events.push(MatchEvent::OverCompleted {
        overs,
        score,
        wickets,
    });

    let bowler = state
        .play
        .bowler
        .as_ref()
        .map(|b| b.name.clone())
        .unwrap_or_default();
    if available_bowlers(state).is_empty() {
        info!(bowler = %bowler, "No eligible change, bowler continues");
        events.push(MatchEvent::BowlerContinues { bowler });
    } else if !state.is_awaiting(PendingInput::AwaitingNewBowler) {
        state.play.pending.push(PendingInput::AwaitingNewBowler);
    }
}

/// End the current over before six legal balls, e.g. on the scorer's call.
pub fn end_over_early(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    if state.innings_in_progress().is_none() {
        return Err(DomainError::phase_mismatch("No innings in progress"));
    }
    if let Some(pending) = state.play.pending.first() {
        return Err(DomainError::validation(
            ValidationKind::AwaitingInput,
            format!("Waiting for {pending:?} before ending the over"),
        ));
    }
    if state.batting_team().balls_in_current_over == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            "No ball has been bowled in this over",
        ));
    }
    let mut events = Vec::new();
    close_over(state, &mut events);
    Ok(MatchUpdate::with_events(events))
}

/// Bring a fresh bowler on for the next over. Figures start from zero.
pub fn select_new_bowler(
    state: &mut MatchState,
    player_id: PlayerId,
) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    if !state.is_awaiting(PendingInput::AwaitingNewBowler) {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            "No bowling change is due",
        ));
    }
    let Some(player) = available_bowlers(state)
        .into_iter()
        .find(|p| p.id == player_id)
    else {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            format!("Player {player_id} cannot bowl the next over"),
        ));
    };
    let bowler = Bowler::new(player);
    let name = bowler.name.clone();
    state.play.bowler = Some(bowler);
    state.clear_pending(PendingInput::AwaitingNewBowler);

    info!(bowler = %name, overs = state.batting_team().overs, "Bowling change");
    Ok(MatchUpdate::with_events(vec![MatchEvent::BowlerChanged {
        bowler: name,
    }]))
}

/// Let the bowler who just finished carry on.
pub fn keep_current_bowler(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    if !state.is_awaiting(PendingInput::AwaitingNewBowler) {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            "No bowling change is due",
        ));
    }
    state.clear_pending(PendingInput::AwaitingNewBowler);
    let bowler = state
        .play
        .bowler
        .as_ref()
        .map(|b| b.name.clone())
        .unwrap_or_default();
    info!(bowler = %bowler, "Bowler continues");
    Ok(MatchUpdate::with_events(vec![MatchEvent::BowlerContinues {
        bowler,
    }]))
}
