use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_INNINGS_CLOSE_DELAY_MS: u64 = 1500;
const DEFAULT_INNINGS_BREAK_DELAY_MS: u64 = 3000;
const DEFAULT_SCHEDULED_OVERS: u32 = 20;

/// Pacing and display settings for a scoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Between the final wicket and the innings actually closing.
    pub innings_close_delay: Duration,
    /// Between innings 1 closing and second-innings selection opening.
    pub innings_break_delay: Duration,
    /// Display only: feeds balls remaining and the required rate.
    pub scheduled_overs: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            innings_close_delay: Duration::from_millis(DEFAULT_INNINGS_CLOSE_DELAY_MS),
            innings_break_delay: Duration::from_millis(DEFAULT_INNINGS_BREAK_DELAY_MS),
            scheduled_overs: DEFAULT_SCHEDULED_OVERS,
        }
    }
}

impl ScoringConfig {
    /// Reads `SCORING_INNINGS_CLOSE_DELAY_MS`, `SCORING_INNINGS_BREAK_DELAY_MS`
    /// and `SCORING_SCHEDULED_OVERS`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            innings_close_delay: Duration::from_millis(var_or(
                "SCORING_INNINGS_CLOSE_DELAY_MS",
                DEFAULT_INNINGS_CLOSE_DELAY_MS,
            )?),
            innings_break_delay: Duration::from_millis(var_or(
                "SCORING_INNINGS_BREAK_DELAY_MS",
                DEFAULT_INNINGS_BREAK_DELAY_MS,
            )?),
            scheduled_overs: var_or("SCORING_SCHEDULED_OVERS", DEFAULT_SCHEDULED_OVERS)?,
        })
    }

    /// No pacing: deferred transitions fall due as soon as they are scheduled.
    pub fn immediate() -> Self {
        Self {
            innings_close_delay: Duration::ZERO,
            innings_break_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
