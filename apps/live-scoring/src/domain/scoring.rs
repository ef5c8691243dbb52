//! Applying deliveries: runs off the bat, extras, and wickets.
//!
//! Every operation validates before it mutates, so a rejected call leaves the
//! match untouched. A successful call saves an undo checkpoint, updates the
//! team, batsman, and bowler aggregates, appends one ledger entry, and then
//! runs the follow-up checks: target reached first, otherwise over complete.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::batting::{available_batsmen, rotate_strike};
use crate::domain::bowling::close_over;
use crate::domain::events::{MatchEvent, MatchUpdate};
use crate::domain::ledger::{Delivery, ExtraType, ScoreLine};
use crate::domain::lifecycle::complete_match;
use crate::domain::rules::{ExtraKind, Runs, BALLS_PER_OVER, EXTRA_RUNS, MAX_WICKETS};
use crate::domain::state::{require_bowler, Innings, MatchState, PendingInput};
use crate::errors::domain::{DomainError, ValidationKind};

/// Who faced and who bowled, captured before any aggregate changes.
struct DeliveryContext {
    innings: Innings,
    striker: usize,
    batsman_name: String,
    bowler_name: String,
    was_free_hit: bool,
}

fn accepting_delivery(state: &MatchState) -> Result<DeliveryContext, DomainError> {
    if state.is_completed() {
        return Err(DomainError::match_completed());
    }
    let Some(innings) = state.innings_in_progress() else {
        return Err(DomainError::phase_mismatch("No innings in progress"));
    };
    let Some(striker) = state.striker_index() else {
        return Err(DomainError::no_striker());
    };
    if let Some(pending) = state.play.pending.first() {
        return Err(DomainError::validation(
            ValidationKind::AwaitingInput,
            format!("Waiting for {pending:?} before the next delivery"),
        ));
    }
    let bowler = require_bowler(state, "delivery")?;
    Ok(DeliveryContext {
        innings,
        striker,
        batsman_name: state.play.batsmen[striker].name.clone(),
        bowler_name: bowler.name.clone(),
        was_free_hit: state.play.is_free_hit,
    })
}

/// An over held open for a free hit is already full; its free-hit ball
/// does not count again.
fn over_has_room(state: &MatchState) -> bool {
    state.batting_team().balls_in_current_over < BALLS_PER_OVER
}

fn add_ball(state: &mut MatchState) {
    state.batting_team_mut().balls_in_current_over += 1;
    if let Some(bowler) = state.play.bowler.as_mut() {
        bowler.balls_bowled += 1;
    }
}

struct Entry {
    runs_off_bat: u8,
    extra_runs: u8,
    extra_type: ExtraType,
    is_wicket: bool,
    is_legal: bool,
    hat_trick: bool,
}

fn append_delivery(state: &mut MatchState, ctx: &DeliveryContext, entry: Entry) -> Delivery {
    let team = state.batting_team();
    let delivery = Delivery {
        seq: state.ledger.next_seq(),
        innings: ctx.innings,
        over_number: team.overs,
        ball_number_in_over: team.balls_in_current_over,
        bowler_name: ctx.bowler_name.clone(),
        batsman_name: ctx.batsman_name.clone(),
        runs_off_bat: entry.runs_off_bat,
        extra_runs: entry.extra_runs,
        extra_type: entry.extra_type,
        is_wicket: entry.is_wicket,
        is_legal: entry.is_legal,
        free_hit: ctx.was_free_hit,
        hat_trick: entry.hat_trick,
        resulting_score: ScoreLine {
            runs: team.score,
            wickets: team.wickets,
        },
        recorded_at: OffsetDateTime::now_utc(),
    };
    state.ledger.append(delivery.clone());
    delivery
}

/// Target reached ends the match; otherwise six legal balls with no free hit
/// pending end the over. At most one of the two fires.
fn after_delivery(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<(), DomainError> {
    let team = state.batting_team();
    if state.play.current_innings == Innings::Second && team.score >= state.play.target {
        events.push(MatchEvent::TargetReached {
            team: team.name.clone(),
        });
        events.extend(complete_match(state)?.events);
        return Ok(());
    }
    if team.balls_in_current_over >= BALLS_PER_OVER && !state.play.is_free_hit {
        close_over(state, events);
    }
    Ok(())
}

/// Record runs off the bat (0..=6) for the striker.
pub fn record_run(state: &mut MatchState, runs: u8) -> Result<MatchUpdate, DomainError> {
    let runs = Runs::try_from(runs)?;
    let ctx = accepting_delivery(state)?;
    state.save_checkpoint();

    let r = runs.value();
    let counted = !ctx.was_free_hit && over_has_room(state);
    let mut events = Vec::new();

    state.batting_team_mut().score += u32::from(r);
    if counted {
        add_ball(state);
    }
    {
        let striker = &mut state.play.batsmen[ctx.striker];
        striker.runs += u32::from(r);
        if counted {
            striker.balls_faced += 1;
        }
        match r {
            4 => striker.fours += 1,
            6 => striker.sixes += 1,
            _ => {}
        }
        if r == 4 || r == 6 {
            events.push(MatchEvent::Boundary {
                batsman: striker.name.clone(),
                runs: r,
            });
        }
    }
    if let Some(bowler) = state.play.bowler.as_mut() {
        bowler.runs_conceded += u32::from(r);
    }
    if ctx.was_free_hit {
        state.play.is_free_hit = false;
        events.push(MatchEvent::FreeHitConsumed);
    }

    let delivery = append_delivery(
        state,
        &ctx,
        Entry {
            runs_off_bat: r,
            extra_runs: 0,
            extra_type: ExtraType::None,
            is_wicket: false,
            is_legal: counted,
            hat_trick: false,
        },
    );

    if runs.rotates_strike() && rotate_strike(&mut state.play.batsmen) {
        events.push(MatchEvent::StrikeSwapped);
    }

    debug!(
        innings = ctx.innings.number(),
        over = %delivery.over_ball(),
        runs = r,
        score = %delivery.resulting_score,
        "Run recorded"
    );

    after_delivery(state, &mut events)?;
    Ok(MatchUpdate {
        delivery: Some(delivery),
        events,
    })
}

/// Record a one-run extra of the given kind.
pub fn record_extra(state: &mut MatchState, kind: ExtraKind) -> Result<MatchUpdate, DomainError> {
    let ctx = accepting_delivery(state)?;
    state.save_checkpoint();

    // A pending free hit makes this ball count whatever its kind.
    let counted = (kind.counts_as_ball() || ctx.was_free_hit) && over_has_room(state);
    let mut events = Vec::new();

    state.batting_team_mut().score += u32::from(EXTRA_RUNS);
    if counted {
        add_ball(state);
    }
    if kind.charged_to_bowler() {
        if let Some(bowler) = state.play.bowler.as_mut() {
            bowler.runs_conceded += u32::from(EXTRA_RUNS);
        }
    }
    if kind.credited_to_batsman() {
        let striker = &mut state.play.batsmen[ctx.striker];
        striker.runs += u32::from(EXTRA_RUNS);
        striker.balls_faced += 1;
    }

    if kind.awards_free_hit() {
        state.play.is_free_hit = true;
        events.push(MatchEvent::FreeHitAwarded);
    } else if ctx.was_free_hit {
        state.play.is_free_hit = false;
        events.push(MatchEvent::FreeHitConsumed);
    }

    let delivery = append_delivery(
        state,
        &ctx,
        Entry {
            runs_off_bat: 0,
            extra_runs: EXTRA_RUNS,
            extra_type: kind.into(),
            is_wicket: false,
            is_legal: counted,
            hat_trick: false,
        },
    );

    debug!(
        innings = ctx.innings.number(),
        over = %delivery.over_ball(),
        extra = ?kind,
        score = %delivery.resulting_score,
        "Extra recorded"
    );

    after_delivery(state, &mut events)?;
    Ok(MatchUpdate {
        delivery: Some(delivery),
        events,
    })
}

/// Dismiss the striker. Suppressed (nothing recorded) on a free hit.
pub fn record_wicket(state: &mut MatchState) -> Result<MatchUpdate, DomainError> {
    let ctx = accepting_delivery(state)?;
    if ctx.was_free_hit {
        info!(batsman = %ctx.batsman_name, "Wicket called on a free hit, ignored");
        return Ok(MatchUpdate::with_events(vec![
            MatchEvent::WicketSuppressedOnFreeHit,
        ]));
    }
    state.save_checkpoint();

    let hat_trick = state
        .ledger
        .last_two_wickets_by(ctx.innings, &ctx.bowler_name);
    let counted = over_has_room(state);
    let mut events = vec![MatchEvent::Wicket {
        batsman: ctx.batsman_name.clone(),
        bowler: ctx.bowler_name.clone(),
    }];

    state.batting_team_mut().wickets += 1;
    if counted {
        add_ball(state);
    }
    if let Some(bowler) = state.play.bowler.as_mut() {
        bowler.wickets_taken += 1;
    }
    {
        let striker = &mut state.play.batsmen[ctx.striker];
        striker.is_out = true;
        striker.is_on_strike = false;
    }
    if hat_trick {
        events.push(MatchEvent::HatTrick {
            bowler: ctx.bowler_name.clone(),
        });
    }

    let delivery = append_delivery(
        state,
        &ctx,
        Entry {
            runs_off_bat: 0,
            extra_runs: 0,
            extra_type: ExtraType::None,
            is_wicket: true,
            is_legal: counted,
            hat_trick,
        },
    );

    info!(
        innings = ctx.innings.number(),
        over = %delivery.over_ball(),
        batsman = %ctx.batsman_name,
        bowler = %ctx.bowler_name,
        score = %delivery.resulting_score,
        hat_trick,
        "Wicket"
    );

    after_delivery(state, &mut events)?;

    let team = state.batting_team();
    if team.wickets >= MAX_WICKETS || available_batsmen(state).is_empty() {
        // Nothing else can happen in this innings; the close runs as a
        // separate transition.
        events.push(MatchEvent::AllOut {
            team: team.name.clone(),
            score: team.score,
        });
        state.play.pending = vec![PendingInput::InningsClosing];
    } else {
        state.play.pending.insert(0, PendingInput::AwaitingNewBatsman);
    }

    Ok(MatchUpdate {
        delivery: Some(delivery),
        events,
    })
}
