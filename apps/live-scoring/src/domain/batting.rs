//! Who is on strike, and who comes in after a dismissal.

use tracing::info;

use crate::domain::events::{MatchEvent, MatchUpdate};
use crate::domain::roster::{Player, PlayerId};
use crate::domain::state::{Batsman, MatchState, PendingInput};
use crate::errors::domain::{DomainError, ValidationKind};

/// Exchange ends between the two not-out batsmen.
///
/// Returns `false` (and changes nothing) unless exactly two are not out.
pub(crate) fn rotate_strike(batsmen: &mut [Batsman]) -> bool {
    if batsmen.iter().filter(|b| !b.is_out).count() != 2 {
        return false;
    }
    for b in batsmen.iter_mut().filter(|b| !b.is_out) {
        b.is_on_strike = !b.is_on_strike;
    }
    true
}

/// Manual strike swap between deliveries. No-op with fewer than two not out.
pub fn swap_strike(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    if !rotate_strike(&mut state.play.batsmen) {
        return Ok(MatchUpdate::default());
    }
    info!(
        striker = state.striker().map(|b| b.name.as_str()).unwrap_or(""),
        "Strike swapped"
    );
    Ok(MatchUpdate::with_events(vec![MatchEvent::StrikeSwapped]))
}

/// Batting-side players who have not yet come in this innings.
///
/// Dismissed players stay in the innings' batsmen list, so they are never
/// offered again.
pub fn available_batsmen(state: &MatchState) -> Vec<&Player> {
    state
        .batting_sheet()
        .players
        .iter()
        .filter(|p| !state.play.batsmen.iter().any(|b| b.id == p.id))
        .collect()
}

/// Fill the vacancy left by a wicket. The new batsman always takes strike.
pub fn select_new_batsman(
    state: &mut MatchState,
    player_id: PlayerId,
) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    let candidates = available_batsmen(state);
    if candidates.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::AllOut,
            "No batsmen left to come in",
        ));
    }
    if !state.is_awaiting(PendingInput::AwaitingNewBatsman) {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            "No vacancy at the crease",
        ));
    }
    let Some(player) = candidates.into_iter().find(|p| p.id == player_id) else {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            format!("Player {player_id} cannot bat now"),
        ));
    };
    let incoming = Batsman::new(player, true);

    for b in state.play.batsmen.iter_mut() {
        b.is_on_strike = false;
    }
    let name = incoming.name.clone();
    state.play.batsmen.push(incoming);
    state.clear_pending(PendingInput::AwaitingNewBatsman);

    info!(batsman = %name, wickets = state.batting_team().wickets, "New batsman");
    Ok(MatchUpdate::with_events(vec![MatchEvent::NewBatsman {
        name,
    }]))
}
