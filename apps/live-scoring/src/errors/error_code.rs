//! Error codes surfaced to callers of the scoring engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE.

use core::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Scoring rules
    /// No batsman on strike
    NoStriker,
    /// Match already decided
    MatchCompleted,
    /// Batsman or bowler not eligible
    InvalidSelection,
    /// No batsmen left to come in
    AllOut,
    /// Opening batsmen or bowler invalid
    InvalidLineup,
    /// Operation not valid in the current phase
    PhaseMismatch,
    /// Selection or transition pending
    AwaitingInput,
    /// Runs off the bat out of range
    InvalidRuns,
    /// Team sheet unusable
    InvalidRoster,
    /// General validation error
    ValidationError,

    // Session and process
    /// Configuration error
    ConfigError,
    /// Session task is gone
    SessionClosed,
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NoStriker => "NO_STRIKER",
            ErrorCode::MatchCompleted => "MATCH_COMPLETED",
            ErrorCode::InvalidSelection => "INVALID_SELECTION",
            ErrorCode::AllOut => "ALL_OUT",
            ErrorCode::InvalidLineup => "INVALID_LINEUP",
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::AwaitingInput => "AWAITING_INPUT",
            ErrorCode::InvalidRuns => "INVALID_RUNS",
            ErrorCode::InvalidRoster => "INVALID_ROSTER",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::SessionClosed => "SESSION_CLOSED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::NoStriker,
        ErrorCode::MatchCompleted,
        ErrorCode::InvalidSelection,
        ErrorCode::AllOut,
        ErrorCode::InvalidLineup,
        ErrorCode::PhaseMismatch,
        ErrorCode::AwaitingInput,
        ErrorCode::InvalidRuns,
        ErrorCode::InvalidRoster,
        ErrorCode::ValidationError,
        ErrorCode::ConfigError,
        ErrorCode::SessionClosed,
        ErrorCode::InternalError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&crate::errors::domain::ValidationKind> for ErrorCode {
    fn from(kind: &crate::errors::domain::ValidationKind) -> Self {
        use crate::errors::domain::ValidationKind;
        match kind {
            ValidationKind::NoStriker => ErrorCode::NoStriker,
            ValidationKind::MatchCompleted => ErrorCode::MatchCompleted,
            ValidationKind::InvalidSelection => ErrorCode::InvalidSelection,
            ValidationKind::AllOut => ErrorCode::AllOut,
            ValidationKind::InvalidLineup => ErrorCode::InvalidLineup,
            ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
            ValidationKind::AwaitingInput => ErrorCode::AwaitingInput,
            ValidationKind::InvalidRuns => ErrorCode::InvalidRuns,
            ValidationKind::InvalidRoster => ErrorCode::InvalidRoster,
            ValidationKind::Other(_) => ErrorCode::ValidationError,
        }
    }
}
