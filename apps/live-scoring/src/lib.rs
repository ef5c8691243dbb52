#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::scoring::ScoringConfig;
pub use domain::commands::MatchCommand;
pub use domain::state::{MatchSetup, MatchState};
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::{spawn_session, MatchSession, SessionHandle};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
