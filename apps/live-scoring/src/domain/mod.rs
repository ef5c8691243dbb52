//! Domain layer: pure scoring rules and match lifecycle.

pub mod batting;
pub mod bowling;
pub mod commands;
pub mod events;
pub mod ledger;
pub mod lifecycle;
pub mod result;
pub mod roster;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod toss;
pub mod undo;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_batting;
#[cfg(test)]
mod tests_bowling;
#[cfg(test)]
mod tests_props_undo;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use batting::{available_batsmen, select_new_batsman, swap_strike};
pub use bowling::{available_bowlers, end_over_early, keep_current_bowler, select_new_bowler};
pub use commands::{apply, replay, MatchCommand};
pub use events::{MatchEvent, MatchUpdate};
pub use ledger::{Delivery, ExtraType, Ledger, ScoreLine};
pub use lifecycle::{
    call_toss, choose_toss_decision, complete_match, declare_innings, end_innings,
    open_second_innings, reset_match, resolve_toss, select_lineup, Lineup,
};
pub use result::{FinalScore, MarginType, MatchResult};
pub use roster::{Player, PlayerId, Role, Side, TeamSheet};
pub use rules::{ExtraKind, Runs, BALLS_PER_OVER, MAX_WICKETS};
pub use scoring::{record_extra, record_run, record_wicket};
pub use snapshot::{scoreboard, Scoreboard};
pub use state::{Innings, MatchSetup, MatchState, PendingInput, Phase};
pub use toss::{flip_coin, CoinFace, TossDecision};
pub use undo::undo_last;
