use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const BALLS_PER_OVER: u8 = 6;
pub const MAX_WICKETS: u8 = 10;
/// Every extra is worth a single run to the batting side.
pub const EXTRA_RUNS: u8 = 1;

/// Runs taken off the bat on one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Runs(u8);

impl Runs {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Odd runs leave the batsmen at opposite ends.
    pub fn rotates_strike(self) -> bool {
        self.0 % 2 == 1
    }
}

impl TryFrom<u8> for Runs {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 6 {
            return Err(DomainError::validation(
                ValidationKind::InvalidRuns,
                format!("Runs off the bat must be 0..=6, got {value}"),
            ));
        }
        Ok(Runs(value))
    }
}

impl From<Runs> for u8 {
    fn from(runs: Runs) -> Self {
        runs.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    /// Byes and leg-byes use up a ball; wides and no-balls are bowled again.
    pub fn counts_as_ball(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }

    pub fn charged_to_bowler(self) -> bool {
        matches!(self, ExtraKind::Wide | ExtraKind::NoBall)
    }

    pub fn awards_free_hit(self) -> bool {
        matches!(self, ExtraKind::NoBall)
    }

    /// Byes go to the striker's tally along with the ball faced.
    pub fn credited_to_batsman(self) -> bool {
        matches!(self, ExtraKind::Bye)
    }
}

/// Renders a ball count as cricket overs notation (`18.2`).
pub fn overs_notation(overs: u32, balls: u8) -> String {
    format!("{overs}.{balls}")
}

/// Splits a raw ball count into completed overs and the remainder.
pub fn split_balls(balls: u32) -> (u32, u8) {
    let per_over = u32::from(BALLS_PER_OVER);
    (balls / per_over, (balls % per_over) as u8)
}

/// Runs per six balls, two decimals; zero before the first ball.
pub fn run_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    let rate = f64::from(runs) * f64::from(BALLS_PER_OVER) / f64::from(balls);
    (rate * 100.0).round() / 100.0
}
