//! Public scoreboard view for display collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{overs_notation, run_rate, split_balls, BALLS_PER_OVER};
use crate::domain::state::{Innings, MatchState, PendingInput, Phase};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatsmanLine {
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub on_strike: bool,
    /// Runs per hundred balls, two decimals.
    pub strike_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BowlerLine {
    pub name: String,
    /// `O.B-R-W`, e.g. `3.2-21-1`.
    pub figures: String,
    pub economy: f64,
}

/// Chase-only figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaseLine {
    pub target: u32,
    pub runs_needed: u32,
    pub balls_remaining: u32,
    pub required_run_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub phase: Phase,
    pub innings: Innings,
    pub batting_team: String,
    pub bowling_team: String,
    /// `R/W`
    pub score: String,
    /// `O.B`
    pub overs: String,
    pub current_run_rate: f64,
    pub free_hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chase: Option<ChaseLine>,
    pub batsmen: Vec<BatsmanLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler: Option<BowlerLine>,
    /// Marks for the over in progress (`1`, `4`, `W`, `Wd`, `Nb`, `B`, `Lb`).
    pub this_over: Vec<String>,
    pub pending: Vec<PendingInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

fn two_decimals(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Build the scoreboard. `scheduled_overs` only feeds the chase figures.
pub fn scoreboard(state: &MatchState, scheduled_overs: u32) -> Scoreboard {
    let team = state.batting_team();
    let balls = team.legal_balls();
    let innings = state.play.current_innings;

    let chase = (innings == Innings::Second && state.play.target > 0).then(|| {
        let scheduled = scheduled_overs * u32::from(BALLS_PER_OVER);
        let balls_remaining = scheduled.saturating_sub(balls);
        let runs_needed = state.play.target.saturating_sub(team.score);
        ChaseLine {
            target: state.play.target,
            runs_needed,
            balls_remaining,
            required_run_rate: run_rate(runs_needed, balls_remaining),
        }
    });

    let batsmen = state
        .not_out_batsmen()
        .map(|b| BatsmanLine {
            name: b.name.clone(),
            runs: b.runs,
            balls_faced: b.balls_faced,
            fours: b.fours,
            sixes: b.sixes,
            on_strike: b.is_on_strike,
            strike_rate: if b.balls_faced == 0 {
                0.0
            } else {
                two_decimals(f64::from(b.runs) * 100.0 / f64::from(b.balls_faced))
            },
        })
        .collect();

    let bowler = state.play.bowler.as_ref().map(|b| {
        let (o, rem) = split_balls(b.balls_bowled);
        BowlerLine {
            name: b.name.clone(),
            figures: format!(
                "{}-{}-{}",
                overs_notation(o, rem),
                b.runs_conceded,
                b.wickets_taken
            ),
            economy: run_rate(b.runs_conceded, b.balls_bowled),
        }
    });

    let this_over = if state.innings_in_progress().is_some() {
        state
            .ledger
            .over(innings, team.overs)
            .into_iter()
            .map(|d| d.mark())
            .collect()
    } else {
        Vec::new()
    };

    Scoreboard {
        phase: state.play.phase,
        innings,
        batting_team: team.name.clone(),
        bowling_team: state.bowling_team().name.clone(),
        score: format!("{}/{}", team.score, team.wickets),
        overs: overs_notation(team.overs, team.balls_in_current_over),
        current_run_rate: run_rate(team.score, balls),
        free_hit: state.play.is_free_hit,
        chase,
        batsmen,
        bowler,
        this_over,
        pending: state.play.pending.clone(),
        result: state.result().map(|r| r.summary()),
    }
}
