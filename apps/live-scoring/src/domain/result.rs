use serde::{Deserialize, Serialize};

use crate::domain::roster::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginType {
    Runs,
    Wickets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub team: String,
    pub runs: u32,
    pub wickets: u8,
}

/// Terminal outcome handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winning_team: String,
    pub winning_side: Side,
    pub margin_type: MarginType,
    pub margin_value: u32,
    pub final_scores: Vec<FinalScore>,
}

impl MatchResult {
    /// `"Lions won by 6 wickets"`
    pub fn summary(&self) -> String {
        let unit = match (self.margin_type, self.margin_value) {
            (MarginType::Runs, 1) => "run",
            (MarginType::Runs, _) => "runs",
            (MarginType::Wickets, 1) => "wicket",
            (MarginType::Wickets, _) => "wickets",
        };
        format!("{} won by {} {}", self.winning_team, self.margin_value, unit)
    }
}
