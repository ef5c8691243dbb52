//! Serializable commands covering every engine operation.
//!
//! A journal of these replays a match deterministically, provided coin flips
//! are journaled as `ResolveToss` with the outcome that was drawn.

use serde::{Deserialize, Serialize};

use crate::domain::batting::{select_new_batsman, swap_strike};
use crate::domain::bowling::{end_over_early, keep_current_bowler, select_new_bowler};
use crate::domain::events::MatchUpdate;
use crate::domain::lifecycle::{
    call_toss, choose_toss_decision, complete_match, declare_innings, end_innings,
    open_second_innings, resolve_toss, select_lineup, Lineup,
};
use crate::domain::roster::{PlayerId, Side};
use crate::domain::rules::ExtraKind;
use crate::domain::scoring::{record_extra, record_run, record_wicket};
use crate::domain::state::{MatchSetup, MatchState};
use crate::domain::toss::{flip_coin, CoinFace, TossDecision};
use crate::domain::undo::undo_last;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchCommand {
    CallToss { caller: Side, call: CoinFace },
    /// Draw the outcome at random.
    FlipCoin,
    ResolveToss { outcome: CoinFace },
    ChooseToss { decision: TossDecision },
    SelectLineup(Lineup),
    RecordRun { runs: u8 },
    RecordExtra { kind: ExtraKind },
    RecordWicket,
    SwapStrike,
    SelectBatsman { player: PlayerId },
    SelectBowler { player: PlayerId },
    KeepBowler,
    EndOver,
    DeclareInnings,
    EndInnings,
    OpenSecondInnings,
    CompleteMatch,
    Undo,
}

impl MatchCommand {
    /// Swap a random flip for the outcome it produced, so the command can be
    /// journaled.
    pub fn resolved(self) -> MatchCommand {
        match self {
            MatchCommand::FlipCoin => MatchCommand::ResolveToss {
                outcome: flip_coin(),
            },
            other => other,
        }
    }
}

pub fn apply(state: &mut MatchState, command: &MatchCommand) -> Result<MatchUpdate, DomainError> {
    match command {
        MatchCommand::CallToss { caller, call } => call_toss(state, *caller, *call),
        MatchCommand::FlipCoin => resolve_toss(state, flip_coin()),
        MatchCommand::ResolveToss { outcome } => resolve_toss(state, *outcome),
        MatchCommand::ChooseToss { decision } => choose_toss_decision(state, *decision),
        MatchCommand::SelectLineup(lineup) => select_lineup(state, *lineup),
        MatchCommand::RecordRun { runs } => record_run(state, *runs),
        MatchCommand::RecordExtra { kind } => record_extra(state, *kind),
        MatchCommand::RecordWicket => record_wicket(state),
        MatchCommand::SwapStrike => swap_strike(state),
        MatchCommand::SelectBatsman { player } => select_new_batsman(state, *player),
        MatchCommand::SelectBowler { player } => select_new_bowler(state, *player),
        MatchCommand::KeepBowler => keep_current_bowler(state),
        MatchCommand::EndOver => end_over_early(state),
        MatchCommand::DeclareInnings => declare_innings(state),
        MatchCommand::EndInnings => end_innings(state),
        MatchCommand::OpenSecondInnings => open_second_innings(state),
        MatchCommand::CompleteMatch => complete_match(state),
        MatchCommand::Undo => undo_last(state),
    }
}

/// Build a match from `setup` and apply `commands` in order, stopping at the
/// first rejection.
pub fn replay(setup: MatchSetup, commands: &[MatchCommand]) -> Result<MatchState, DomainError> {
    let mut state = MatchState::new(setup)?;
    for command in commands {
        apply(&mut state, command)?;
    }
    Ok(state)
}
