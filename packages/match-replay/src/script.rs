//! Match scripts: team sheets plus the commands to apply, as JSON.

use std::path::Path;
use std::time::Instant;

use live_scoring::domain::events::MatchEvent;
use live_scoring::{AppError, MatchCommand, MatchSession, MatchSetup, ScoringConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScript {
    pub setup: MatchSetup,
    pub commands: Vec<MatchCommand>,
}

impl MatchScript {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let script: MatchScript = serde_json::from_str(&raw)?;
        Ok(script)
    }
}

/// How deferred transitions are handled during a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// The script names every transition, as a session journal does.
    Strict,
    /// Due transitions fire between commands.
    AutoTransitions,
}

/// Apply every command in order, stopping at the first rejection.
///
/// The error carries the 1-based index of the failing command.
pub fn run(
    script: MatchScript,
    mode: ReplayMode,
    scheduled_overs: u32,
) -> Result<(MatchSession, Vec<MatchEvent>), (usize, AppError)> {
    let config = ScoringConfig {
        scheduled_overs,
        ..ScoringConfig::immediate()
    };
    let mut session = MatchSession::new(script.setup, config).map_err(|e| (0, e))?;
    let mut events = Vec::new();

    for (i, command) in script.commands.into_iter().enumerate() {
        debug!(step = i + 1, command = ?command, "Applying");
        let update = session.execute(command).map_err(|e| (i + 1, e))?;
        events.extend(update.events);
        if mode == ReplayMode::AutoTransitions {
            for fired in session
                .fire_all_due(Instant::now())
                .map_err(|e| (i + 1, e))?
            {
                events.extend(fired.events);
            }
        }
    }

    info!(
        commands = session.journal().len(),
        deliveries = session.ledger().len(),
        completed = session.state().is_completed(),
        "Replay finished"
    );
    Ok((session, events))
}
