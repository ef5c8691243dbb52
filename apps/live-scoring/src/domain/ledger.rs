//! Append-only ball-by-ball record. Entries are popped only by undo.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::{overs_notation, ExtraKind};
use crate::domain::state::Innings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraType {
    None,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExtraType::None => "none",
            ExtraType::Wide => "wide",
            ExtraType::NoBall => "no_ball",
            ExtraType::Bye => "bye",
            ExtraType::LegBye => "leg_bye",
        }
    }
}

impl From<ExtraKind> for ExtraType {
    fn from(kind: ExtraKind) -> Self {
        match kind {
            ExtraKind::Wide => ExtraType::Wide,
            ExtraKind::NoBall => ExtraType::NoBall,
            ExtraKind::Bye => ExtraType::Bye,
            ExtraKind::LegBye => ExtraType::LegBye,
        }
    }
}

/// Score and wickets right after a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub runs: u32,
    pub wickets: u8,
}

impl std::fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.runs, self.wickets)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// 1-based position in the match ledger.
    pub seq: u32,
    pub innings: Innings,
    /// Completed overs when the ball was bowled.
    pub over_number: u32,
    /// Legal balls in the over after this delivery.
    pub ball_number_in_over: u8,
    pub bowler_name: String,
    pub batsman_name: String,
    pub runs_off_bat: u8,
    pub extra_runs: u8,
    pub extra_type: ExtraType,
    pub is_wicket: bool,
    /// Whether the ball counted toward the over.
    pub is_legal: bool,
    /// Bowled as a free hit.
    pub free_hit: bool,
    pub hat_trick: bool,
    pub resulting_score: ScoreLine,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl Delivery {
    pub fn total_runs(&self) -> u32 {
        u32::from(self.runs_off_bat) + u32::from(self.extra_runs)
    }

    /// `over.ball` as shown on a ball-by-ball feed.
    pub fn over_ball(&self) -> String {
        overs_notation(self.over_number, self.ball_number_in_over)
    }

    /// Short mark for an over-progress strip.
    pub fn mark(&self) -> String {
        if self.is_wicket {
            return "W".to_string();
        }
        match self.extra_type {
            ExtraType::None => self.runs_off_bat.to_string(),
            ExtraType::Wide => "Wd".to_string(),
            ExtraType::NoBall => "Nb".to_string(),
            ExtraType::Bye => "B".to_string(),
            ExtraType::LegBye => "Lb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<Delivery>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, delivery: Delivery) {
        self.entries.push(delivery);
    }

    pub fn pop(&mut self) -> Option<Delivery> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Delivery] {
        &self.entries
    }

    pub fn next_seq(&self) -> u32 {
        self.entries.len() as u32 + 1
    }

    fn innings(&self, innings: Innings) -> impl Iterator<Item = &Delivery> {
        self.entries.iter().filter(move |d| d.innings == innings)
    }

    /// Deliveries bowled in the given over, oldest first.
    pub fn over(&self, innings: Innings, over_number: u32) -> Vec<&Delivery> {
        self.innings(innings)
            .filter(|d| d.over_number == over_number)
            .collect()
    }

    /// True when the two most recent entries of the innings are both
    /// wickets credited to `bowler`.
    pub fn last_two_wickets_by(&self, innings: Innings, bowler: &str) -> bool {
        let mut recent = self.entries.iter().rev().filter(|d| d.innings == innings);
        let (Some(a), Some(b)) = (recent.next(), recent.next()) else {
            return false;
        };
        a.is_wicket && b.is_wicket && a.bowler_name == bowler && b.bowler_name == bowler
    }
}
