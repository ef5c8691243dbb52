//! One match, one writer: applies commands, keeps the journal, and holds the
//! single deferred transition the engine may be waiting on.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::scoring::ScoringConfig;
use crate::domain::commands::{apply, MatchCommand};
use crate::domain::events::MatchUpdate;
use crate::domain::ledger::Delivery;
use crate::domain::lifecycle::reset_match;
use crate::domain::result::MatchResult;
use crate::domain::snapshot::{scoreboard, Scoreboard};
use crate::domain::state::{MatchSetup, MatchState, PendingInput, Phase};
use crate::error::AppError;

/// Transitions that run after a pacing delay instead of on a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTransition {
    /// Innings is over (all out); close it.
    CloseInnings,
    /// Innings break is over; open second-innings selection.
    OpenSecondInnings,
}

impl DeferredTransition {
    fn command(self) -> MatchCommand {
        match self {
            DeferredTransition::CloseInnings => MatchCommand::EndInnings,
            DeferredTransition::OpenSecondInnings => MatchCommand::OpenSecondInnings,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    transition: DeferredTransition,
    due: Instant,
}

#[derive(Debug)]
pub struct MatchSession {
    state: MatchState,
    config: ScoringConfig,
    journal: Vec<MatchCommand>,
    scheduled: Option<Scheduled>,
}

impl MatchSession {
    pub fn new(setup: MatchSetup, config: ScoringConfig) -> Result<Self, AppError> {
        let state = MatchState::new(setup)?;
        Ok(Self {
            state,
            config,
            journal: Vec::new(),
            scheduled: None,
        })
    }

    pub fn execute(&mut self, command: MatchCommand) -> Result<MatchUpdate, AppError> {
        self.execute_at(command, Instant::now())
    }

    /// Apply `command` as of `now`. Random flips are journaled with their
    /// outcome. A rejected command leaves the session untouched.
    pub fn execute_at(
        &mut self,
        command: MatchCommand,
        now: Instant,
    ) -> Result<MatchUpdate, AppError> {
        let command = command.resolved();
        let update = apply(&mut self.state, &command)?;
        debug!(command = ?command, events = update.events.len(), "Command applied");
        self.journal.push(command);
        self.reschedule(now);
        Ok(update)
    }

    /// When the queued transition falls due, if one is queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduled.map(|s| s.due)
    }

    pub fn scheduled(&self) -> Option<DeferredTransition> {
        self.scheduled.map(|s| s.transition)
    }

    /// Run the queued transition if it is due by `now`.
    pub fn fire_due(&mut self, now: Instant) -> Result<Option<MatchUpdate>, AppError> {
        let Some(scheduled) = self.scheduled.filter(|s| s.due <= now) else {
            return Ok(None);
        };
        self.scheduled = None;
        info!(transition = ?scheduled.transition, "Deferred transition firing");
        self.execute_at(scheduled.transition.command(), now)
            .map(Some)
            .map_err(|err| {
                AppError::internal(format!(
                    "Queued {:?} no longer applies: {}",
                    scheduled.transition,
                    err.detail()
                ))
            })
    }

    /// Run every transition that is already due, in order.
    pub fn fire_all_due(&mut self, now: Instant) -> Result<Vec<MatchUpdate>, AppError> {
        let mut fired = Vec::new();
        while let Some(update) = self.fire_due(now)? {
            fired.push(update);
        }
        Ok(fired)
    }

    /// Throw the match away and start over with the same sheets.
    pub fn reset(&mut self) -> MatchUpdate {
        self.journal.clear();
        self.scheduled = None;
        reset_match(&mut self.state)
    }

    /// Keep the queued transition in step with what the state is waiting
    /// for. Anything no longer wanted (e.g. after an undo) is cancelled.
    fn reschedule(&mut self, now: Instant) {
        let wanted = if self.state.is_awaiting(PendingInput::InningsClosing) {
            Some((DeferredTransition::CloseInnings, self.config.innings_close_delay))
        } else if self.state.play.phase == Phase::InningsBreak {
            Some((
                DeferredTransition::OpenSecondInnings,
                self.config.innings_break_delay,
            ))
        } else {
            None
        };

        match (wanted, self.scheduled) {
            (Some((transition, _)), Some(current)) if current.transition == transition => {}
            (Some((transition, delay)), _) => {
                info!(
                    transition = ?transition,
                    delay_ms = delay.as_millis() as u64,
                    "Transition scheduled"
                );
                self.scheduled = Some(Scheduled {
                    transition,
                    due: now + delay,
                });
            }
            (None, Some(current)) => {
                info!(transition = ?current.transition, "Scheduled transition cancelled");
                self.scheduled = None;
            }
            (None, None) => {}
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn ledger(&self) -> &[Delivery] {
        self.state.ledger.entries()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        scoreboard(&self.state, self.config.scheduled_overs)
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.state.result()
    }

    /// Every accepted command, in order; replaying it rebuilds the match.
    pub fn journal(&self) -> &[MatchCommand] {
        &self.journal
    }
}
