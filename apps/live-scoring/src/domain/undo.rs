//! Take back the most recent delivery.

use tracing::info;

use crate::domain::events::{MatchEvent, MatchUpdate};
use crate::domain::state::MatchState;
use crate::errors::domain::DomainError;

/// Pop the last ledger entry and restore the play state saved just before it.
///
/// Restoring the snapshot reverses every aggregate the delivery touched,
/// including an over it closed and any selection it asked for. Only
/// deliveries of the innings in progress can be taken back; anything else is
/// a no-op, as is an empty ledger.
pub fn undo_last(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    let Some(checkpoint) = state.checkpoints.pop() else {
        return Ok(MatchUpdate::default());
    };
    let Some(delivery) = state.ledger.pop() else {
        return Err(DomainError::validation_other(
            "Invariant violated: undo checkpoint without a ledger entry",
        ));
    };
    state.play = checkpoint;

    info!(
        seq = delivery.seq,
        innings = delivery.innings.number(),
        over = %delivery.over_ball(),
        score = %state.batting_team().score,
        "Delivery undone"
    );
    Ok(MatchUpdate {
        events: vec![MatchEvent::DeliveryUndone { seq: delivery.seq }],
        delivery: Some(delivery),
    })
}
