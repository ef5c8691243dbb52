pub mod runner;
pub mod session;

pub use runner::{spawn_session, SessionHandle};
pub use session::{DeferredTransition, MatchSession};
