//! Domain-level error type used by the scoring rules and match lifecycle.
//!
//! This error type knows nothing about sessions or transports. Callers at the
//! session boundary convert it into `crate::error::AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations a caller can correct and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Scoring attempted with no not-out batsman on strike.
    NoStriker,
    /// Any mutating call after the match has been decided.
    MatchCompleted,
    /// Batsman or bowler choice violates eligibility rules.
    InvalidSelection,
    /// No batsman candidates remain; the innings has to close.
    AllOut,
    /// Opening selection underspecified or duplicated.
    InvalidLineup,
    /// Operation not valid in the current lifecycle phase.
    PhaseMismatch,
    /// A delivery was attempted while a selection or transition is pending.
    AwaitingInput,
    /// Runs off the bat outside 0..=6.
    InvalidRuns,
    /// Team sheet is unusable (blank name, too few players, duplicate ids).
    InvalidRoster,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or cricket rule violation
    Validation(ValidationKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other("INVARIANT".into()), detail.into())
    }

    pub fn no_striker() -> Self {
        Self::validation(
            ValidationKind::NoStriker,
            "No batsman on strike, select a new batsman first",
        )
    }

    pub fn match_completed() -> Self {
        Self::validation(ValidationKind::MatchCompleted, "Match is already completed")
    }

    pub fn phase_mismatch(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::PhaseMismatch, detail)
    }

    pub fn kind(&self) -> &ValidationKind {
        match self {
            DomainError::Validation(kind, _) => kind,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, detail) => detail,
        }
    }
}
