//! Match lifecycle: toss, openers, innings changes, and the result.
//!
//! `PreToss → TossCalled → TossResolved → TeamSelection(1) →
//! InningsInProgress(1) → InningsBreak → TeamSelection(2) →
//! InningsInProgress(2) → MatchComplete`

use serde::{Deserialize, Serialize};
use tracing::info;
use ulid::Ulid;

use crate::domain::events::{MatchEvent, MatchUpdate};
use crate::domain::ledger::Ledger;
use crate::domain::result::{FinalScore, MarginType, MatchResult};
use crate::domain::roster::{PlayerId, Side};
use crate::domain::rules::MAX_WICKETS;
use crate::domain::state::{
    require_batting_first, Batsman, Bowler, Innings, MatchHeader, MatchSetup, MatchState, Phase,
    PlayState, TeamInnings,
};
use crate::domain::toss::{toss_winner, CoinFace, TossDecision, TossState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Opening batsmen and bowler for an innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

impl MatchState {
    /// A fresh match waiting for the toss.
    pub fn new(setup: MatchSetup) -> Result<Self, DomainError> {
        setup.team1.validate()?;
        setup.team2.validate()?;
        if setup.team1.name == setup.team2.name {
            return Err(DomainError::validation(
                ValidationKind::InvalidRoster,
                "Both sides have the same name",
            ));
        }
        let play = initial_play(&setup.team1.name, &setup.team2.name);
        let state = MatchState {
            header: MatchHeader {
                match_id: Ulid::new(),
                venue: setup.venue,
                tournament: setup.tournament,
            },
            sheets: [setup.team1, setup.team2],
            toss: TossState::default(),
            play,
            ledger: Ledger::new(),
            checkpoints: Vec::new(),
        };
        info!(
            match_id = %state.header.match_id,
            team1 = %state.sheets[0].name,
            team2 = %state.sheets[1].name,
            "Match created"
        );
        Ok(state)
    }

    /// The decided result, once the match is complete.
    pub fn result(&self) -> Option<&MatchResult> {
        self.play.result.as_ref()
    }
}

fn initial_play(team1: &str, team2: &str) -> PlayState {
    let mut first = TeamInnings::new(Side::Team1, team1);
    // Placeholder until the toss decides who bats.
    first.is_batting = true;
    PlayState {
        phase: Phase::PreToss,
        teams: [first, TeamInnings::new(Side::Team2, team2)],
        current_innings: Innings::First,
        batting_first: None,
        target: 0,
        is_free_hit: false,
        match_completed: false,
        batsmen: Vec::new(),
        bowler: None,
        pending: Vec::new(),
        result: None,
    }
}

fn ensure_open(state: &MatchState) -> Result<(), DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    Ok(())
}

/// Start again with the same sheets: new match id, empty ledger.
pub fn reset_match(state: &mut MatchState) -> MatchUpdate {
    state.header.match_id = Ulid::new();
    state.toss = TossState::default();
    state.play = initial_play(&state.sheets[0].name, &state.sheets[1].name);
    state.ledger.clear();
    state.checkpoints.clear();
    info!(match_id = %state.header.match_id, "Match reset");
    MatchUpdate::default()
}

/// Record a side's call. May be re-issued until the coin is flipped.
pub fn call_toss(
    state: &mut MatchState,
    caller: Side,
    call: CoinFace,
) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    if !matches!(state.play.phase, Phase::PreToss | Phase::TossCalled) {
        return Err(DomainError::phase_mismatch("The toss has already been decided"));
    }
    state.toss.caller = Some(caller);
    state.toss.call = Some(call);
    state.play.phase = Phase::TossCalled;
    info!(caller = ?caller, call = ?call, "Toss called");
    Ok(MatchUpdate::with_events(vec![MatchEvent::TossCalled {
        caller,
        call,
    }]))
}

/// Apply the coin's outcome to the recorded call.
pub fn resolve_toss(state: &mut MatchState, outcome: CoinFace) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    let (Phase::TossCalled, Some(caller), Some(call)) =
        (state.play.phase, state.toss.caller, state.toss.call)
    else {
        return Err(DomainError::phase_mismatch("Nobody has called the toss"));
    };
    let winner = toss_winner(caller, call, outcome);
    state.toss.outcome = Some(outcome);
    state.toss.winner = Some(winner);
    state.play.phase = Phase::TossResolved;
    info!(outcome = ?outcome, winner = ?winner, "Toss won");
    Ok(MatchUpdate::with_events(vec![MatchEvent::TossWon {
        winner,
        outcome,
    }]))
}

/// Toss winner elects to bat or bowl; batting roles follow.
pub fn choose_toss_decision(
    state: &mut MatchState,
    decision: TossDecision,
) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    let (Phase::TossResolved, Some(winner)) = (state.play.phase, state.toss.winner) else {
        return Err(DomainError::phase_mismatch("The toss has not been won yet"));
    };
    let batting = match decision {
        TossDecision::Bat => winner,
        TossDecision::Bowl => winner.other(),
    };
    state.toss.decision = Some(decision);
    state.play.batting_first = Some(batting);
    state.set_batting(batting);
    state.play.phase = Phase::TeamSelection {
        innings: Innings::First,
    };
    info!(winner = ?winner, decision = ?decision, batting = ?batting, "Toss decision");
    Ok(MatchUpdate::with_events(vec![MatchEvent::TossDecided {
        winner,
        decision,
    }]))
}

/// Name two distinct openers from the batting side and an opening bowler
/// from the fielding side, then start the innings.
pub fn select_lineup(state: &mut MatchState, lineup: Lineup) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    let Phase::TeamSelection { innings } = state.play.phase else {
        return Err(DomainError::phase_mismatch("Openers are not being selected"));
    };
    if lineup.striker == lineup.non_striker {
        return Err(DomainError::validation(
            ValidationKind::InvalidLineup,
            "Openers must be two different players",
        ));
    }
    let batting = state.batting_sheet();
    let (Some(striker), Some(non_striker)) = (
        batting.player(lineup.striker),
        batting.player(lineup.non_striker),
    ) else {
        return Err(DomainError::validation(
            ValidationKind::InvalidLineup,
            format!("Both openers must be on the {} sheet", batting.name),
        ));
    };
    let Some(bowler) = state
        .bowling_sheet()
        .player(lineup.bowler)
        .filter(|p| p.role.can_bowl())
    else {
        return Err(DomainError::validation(
            ValidationKind::InvalidLineup,
            format!("Player {} cannot open the bowling", lineup.bowler),
        ));
    };

    let batsmen = vec![Batsman::new(striker, true), Batsman::new(non_striker, false)];
    let bowler = Bowler::new(bowler);
    let batting_side = state.batting_side();

    state.play.batsmen = batsmen;
    state.play.bowler = Some(bowler);
    state.play.pending.clear();
    state.play.is_free_hit = false;
    state.play.phase = Phase::InningsInProgress { innings };
    state.checkpoints.clear();

    info!(
        innings = innings.number(),
        batting = %state.batting_team().name,
        striker = %state.play.batsmen[0].name,
        non_striker = %state.play.batsmen[1].name,
        "Innings started"
    );
    Ok(MatchUpdate::with_events(vec![MatchEvent::InningsStarted {
        innings,
        batting: batting_side,
    }]))
}

/// Close the innings in progress.
///
/// After the first innings the target is set and the sides swap. After the
/// second, the side that batted first has defended its total.
pub fn end_innings(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    let Some(innings) = state.innings_in_progress() else {
        return Err(DomainError::phase_mismatch("No innings in progress"));
    };
    let team = state.batting_team();
    let (score, wickets) = (team.score, team.wickets);
    let mut events = vec![MatchEvent::InningsClosed {
        innings,
        score,
        wickets,
    }];

    match innings {
        Innings::First => {
            let target = score + 1;
            let next = state.bowling_side();
            state.play.target = target;
            state.play.batsmen.clear();
            state.play.bowler = None;
            state.play.is_free_hit = false;
            state.play.pending.clear();
            state.set_batting(next);
            state.play.current_innings = Innings::Second;
            state.play.phase = Phase::InningsBreak;
            state.checkpoints.clear();
            info!(innings = 1, score, wickets, target, "Innings closed, target set");
            events.push(MatchEvent::TargetSet { target });
        }
        Innings::Second => {
            let winner = require_batting_first(state, "end_innings")?;
            let margin = state.play.target.saturating_sub(score + 1);
            events.extend(decide(state, winner, MarginType::Runs, margin));
        }
    }
    Ok(MatchUpdate {
        delivery: None,
        events,
    })
}

/// Scorer-declared close. Same result rules as the automatic paths; a
/// chase that has already reached its target cannot be declared.
pub fn declare_innings(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    if state.innings_in_progress() == Some(Innings::Second)
        && state.batting_team().score >= state.play.target
    {
        return Err(DomainError::phase_mismatch("Target already reached"));
    }
    info!(innings = state.play.current_innings.number(), "Innings declared");
    end_innings(state)
}

/// Leave the innings break and open team selection for the chase.
pub fn open_second_innings(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    ensure_open(state)?;
    if state.play.phase != Phase::InningsBreak {
        return Err(DomainError::phase_mismatch("Not at the innings break"));
    }
    state.play.phase = Phase::TeamSelection {
        innings: Innings::Second,
    };
    info!(target = state.play.target, "Second innings team selection");
    Ok(MatchUpdate::default())
}

/// The chasing side has reached the target. Calling again is a no-op.
pub fn complete_match(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    if state.is_completed() {
        return Ok(MatchUpdate::default());
    }
    if state.innings_in_progress() != Some(Innings::Second) {
        return Err(DomainError::phase_mismatch("No chase in progress"));
    }
    let team = state.batting_team();
    if team.score < state.play.target {
        return Err(DomainError::phase_mismatch(format!(
            "{} still need {} runs",
            team.name,
            state.play.target - team.score
        )));
    }
    let winner = state.batting_side();
    let margin = u32::from(MAX_WICKETS.saturating_sub(team.wickets));
    Ok(MatchUpdate::with_events(decide(
        state,
        winner,
        MarginType::Wickets,
        margin,
    )))
}

fn decide(
    state: &mut MatchState,
    winner: Side,
    margin_type: MarginType,
    margin_value: u32,
) -> Vec<MatchEvent> {
    let first = state.play.batting_first.unwrap_or(Side::Team1);
    let final_scores = [first, first.other()]
        .into_iter()
        .map(|side| {
            let t = state.team(side);
            FinalScore {
                team: t.name.clone(),
                runs: t.score,
                wickets: t.wickets,
            }
        })
        .collect();
    let result = MatchResult {
        winning_team: state.team(winner).name.clone(),
        winning_side: winner,
        margin_type,
        margin_value,
        final_scores,
    };
    let summary = result.summary();

    state.play.result = Some(result);
    state.play.match_completed = true;
    state.play.pending.clear();
    state.play.phase = Phase::MatchComplete;

    info!(match_id = %state.header.match_id, result = %summary, "Match completed");
    vec![MatchEvent::MatchCompleted { summary }]
}
