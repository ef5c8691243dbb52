//! Shared types for the replay tool.

use clap::ValueEnum;
use serde::Serialize;

use live_scoring::domain::ledger::Delivery;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Ledger as JSON lines plus a ball-by-ball CSV.
    Jsonl,
    /// Ball-by-ball CSV only.
    Csv,
}

/// One CSV row per delivery.
#[derive(Debug, Serialize)]
pub struct CsvDeliveryRow {
    pub seq: u32,
    pub innings: u8,
    pub over: String,
    pub bowler: String,
    pub batsman: String,
    pub runs_off_bat: u8,
    pub extra_runs: u8,
    pub extra_type: String,
    pub total_runs: u32,
    pub wicket: bool,
    pub legal: bool,
    pub free_hit: bool,
    pub hat_trick: bool,
    pub score: String,
}

impl From<&Delivery> for CsvDeliveryRow {
    fn from(d: &Delivery) -> Self {
        Self {
            seq: d.seq,
            innings: d.innings.number(),
            over: d.over_ball(),
            bowler: d.bowler_name.clone(),
            batsman: d.batsman_name.clone(),
            runs_off_bat: d.runs_off_bat,
            extra_runs: d.extra_runs,
            extra_type: d.extra_type.as_str().to_string(),
            total_runs: d.total_runs(),
            wicket: d.is_wicket,
            legal: d.is_legal,
            free_hit: d.free_hit,
            hat_trick: d.hat_trick,
            score: d.resulting_score.to_string(),
        }
    }
}
