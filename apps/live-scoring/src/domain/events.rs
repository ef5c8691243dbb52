//! Informational events returned alongside every state change.

use serde::{Deserialize, Serialize};

use crate::domain::ledger::Delivery;
use crate::domain::roster::Side;
use crate::domain::state::Innings;
use crate::domain::toss::{CoinFace, TossDecision};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    TossCalled { caller: Side, call: CoinFace },
    TossWon { winner: Side, outcome: CoinFace },
    TossDecided { winner: Side, decision: TossDecision },
    InningsStarted { innings: Innings, batting: Side },
    Boundary { batsman: String, runs: u8 },
    StrikeSwapped,
    FreeHitAwarded,
    FreeHitConsumed,
    /// Wicket called on a free hit; nothing was recorded.
    WicketSuppressedOnFreeHit,
    Wicket { batsman: String, bowler: String },
    HatTrick { bowler: String },
    NewBatsman { name: String },
    OverCompleted { overs: u32, score: u32, wickets: u8 },
    BowlerChanged { bowler: String },
    /// No bowling change this over.
    BowlerContinues { bowler: String },
    AllOut { team: String, score: u32 },
    TargetReached { team: String },
    InningsClosed { innings: Innings, score: u32, wickets: u8 },
    TargetSet { target: u32 },
    DeliveryUndone { seq: u32 },
    MatchCompleted { summary: String },
}

/// What a single engine operation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    /// Ledger entry appended (or, for undo, removed) by the operation.
    pub delivery: Option<Delivery>,
    pub events: Vec<MatchEvent>,
}

impl MatchUpdate {
    pub fn with_events(events: Vec<MatchEvent>) -> Self {
        Self {
            delivery: None,
            events,
        }
    }

    pub fn has_event(&self, pred: impl Fn(&MatchEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
