use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::domain::ledger::Ledger;
use crate::domain::result::MatchResult;
use crate::domain::roster::{Player, PlayerId, Side, TeamSheet};
use crate::domain::toss::TossState;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Innings {
    First,
    Second,
}

impl Innings {
    pub fn number(self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
        }
    }
}

/// Match lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Created, no toss call yet.
    PreToss,
    /// A side has called heads or tails.
    TossCalled,
    /// Coin has landed; winner must choose to bat or bowl.
    TossResolved,
    /// Openers and opening bowler must be named.
    TeamSelection { innings: Innings },
    /// Deliveries are being recorded.
    InningsInProgress { innings: Innings },
    /// First innings closed, target set, second innings not yet opened.
    InningsBreak,
    /// Result decided; nothing else may change.
    MatchComplete,
}

/// Input the engine needs before it accepts another delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingInput {
    /// A wicket fell and the vacancy must be filled.
    AwaitingNewBatsman,
    /// An over finished and a bowling change is due.
    AwaitingNewBowler,
    /// The innings is over; the close transition has not run yet.
    InningsClosing,
}

/// One side's running innings aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInnings {
    pub side: Side,
    pub name: String,
    pub score: u32,
    pub wickets: u8,
    /// Completed overs.
    pub overs: u32,
    /// Legal balls in the over being bowled (0..=5 between deliveries).
    pub balls_in_current_over: u8,
    pub is_batting: bool,
}

impl TeamInnings {
    pub fn new(side: Side, name: impl Into<String>) -> Self {
        Self {
            side,
            name: name.into(),
            score: 0,
            wickets: 0,
            overs: 0,
            balls_in_current_over: 0,
            is_batting: false,
        }
    }

    pub fn legal_balls(&self) -> u32 {
        self.overs * u32::from(crate::domain::rules::BALLS_PER_OVER)
            + u32::from(self.balls_in_current_over)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batsman {
    pub id: PlayerId,
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    pub is_on_strike: bool,
}

impl Batsman {
    pub fn new(player: &Player, on_strike: bool) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            is_on_strike: on_strike,
        }
    }
}

/// The bowler currently in the attack. Replaced wholesale on a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bowler {
    pub id: PlayerId,
    pub name: String,
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub wickets_taken: u8,
}

impl Bowler {
    pub fn new(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            balls_bowled: 0,
            runs_conceded: 0,
            wickets_taken: 0,
        }
    }
}

/// Everything a delivery can change. Undo restores a saved copy of this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayState {
    pub phase: Phase,
    pub teams: [TeamInnings; 2],
    pub current_innings: Innings,
    /// Side that batted in the first innings (set by the toss decision).
    pub batting_first: Option<Side>,
    /// Runs needed by the side batting second; 0 until innings 1 closes.
    pub target: u32,
    pub is_free_hit: bool,
    pub match_completed: bool,
    /// Every batsman who has come in this innings, in order of arrival.
    pub batsmen: Vec<Batsman>,
    pub bowler: Option<Bowler>,
    pub pending: Vec<PendingInput>,
    pub result: Option<MatchResult>,
}

/// Display-only fixture details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHeader {
    pub match_id: Ulid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
}

/// Input for creating a match: both team sheets plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub team1: TeamSheet,
    pub team2: TeamSheet,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub tournament: Option<String>,
}

/// Root aggregate for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub header: MatchHeader,
    pub sheets: [TeamSheet; 2],
    pub toss: TossState,
    pub play: PlayState,
    pub ledger: Ledger,
    /// Copies of `play` taken before each delivery of the current innings.
    #[serde(skip)]
    pub(crate) checkpoints: Vec<PlayState>,
}

impl MatchState {
    pub fn batting_side(&self) -> Side {
        if self.play.teams[0].is_batting {
            Side::Team1
        } else {
            Side::Team2
        }
    }

    pub fn bowling_side(&self) -> Side {
        self.batting_side().other()
    }

    pub fn team(&self, side: Side) -> &TeamInnings {
        &self.play.teams[side.index()]
    }

    pub fn batting_team(&self) -> &TeamInnings {
        self.team(self.batting_side())
    }

    pub fn bowling_team(&self) -> &TeamInnings {
        self.team(self.bowling_side())
    }

    pub(crate) fn batting_team_mut(&mut self) -> &mut TeamInnings {
        let idx = self.batting_side().index();
        &mut self.play.teams[idx]
    }

    pub fn sheet(&self, side: Side) -> &TeamSheet {
        &self.sheets[side.index()]
    }

    pub fn batting_sheet(&self) -> &TeamSheet {
        self.sheet(self.batting_side())
    }

    pub fn bowling_sheet(&self) -> &TeamSheet {
        self.sheet(self.bowling_side())
    }

    /// Assign batting roles; the two flags are always complementary.
    pub(crate) fn set_batting(&mut self, side: Side) {
        self.play.teams[side.index()].is_batting = true;
        self.play.teams[side.other().index()].is_batting = false;
    }

    pub fn striker(&self) -> Option<&Batsman> {
        self.play
            .batsmen
            .iter()
            .find(|b| b.is_on_strike && !b.is_out)
    }

    pub(crate) fn striker_index(&self) -> Option<usize> {
        self.play
            .batsmen
            .iter()
            .position(|b| b.is_on_strike && !b.is_out)
    }

    pub fn not_out_batsmen(&self) -> impl Iterator<Item = &Batsman> {
        self.play.batsmen.iter().filter(|b| !b.is_out)
    }

    pub fn is_awaiting(&self, input: PendingInput) -> bool {
        self.play.pending.contains(&input)
    }

    pub(crate) fn clear_pending(&mut self, input: PendingInput) {
        self.play.pending.retain(|p| *p != input);
    }

    pub fn is_completed(&self) -> bool {
        self.play.match_completed
    }

    /// Innings currently accepting deliveries, if any.
    pub fn innings_in_progress(&self) -> Option<Innings> {
        match self.play.phase {
            Phase::InningsInProgress { innings } => Some(innings),
            _ => None,
        }
    }

    /// Number of deliveries that `undo_last` can still take back.
    pub fn undo_depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub(crate) fn save_checkpoint(&mut self) {
        self.checkpoints.push(self.play.clone());
    }
}

pub fn require_bowler<'a>(
    state: &'a MatchState,
    ctx: &'static str,
) -> Result<&'a Bowler, DomainError> {
    state.play.bowler.as_ref().ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: bowler must be set ({ctx})"))
    })
}

pub fn require_batting_first(state: &MatchState, ctx: &'static str) -> Result<Side, DomainError> {
    state.play.batting_first.ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: batting_first must be set ({ctx})"
        ))
    })
}
