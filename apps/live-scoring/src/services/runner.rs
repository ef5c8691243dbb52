//! Async front for a [`MatchSession`]: one task owns the session, requests
//! arrive over a channel, and deferred transitions fire on a timer between
//! requests so they never interleave with a command.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::domain::commands::MatchCommand;
use crate::domain::events::MatchUpdate;
use crate::domain::ledger::Delivery;
use crate::domain::result::MatchResult;
use crate::domain::snapshot::Scoreboard;
use crate::domain::state::MatchState;
use crate::error::AppError;
use crate::services::session::MatchSession;

const REQUEST_BUFFER: usize = 64;

enum Request {
    Execute {
        command: MatchCommand,
        reply: oneshot::Sender<Result<MatchUpdate, AppError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Scoreboard>,
    },
    State {
        reply: oneshot::Sender<MatchState>,
    },
    Ledger {
        reply: oneshot::Sender<Vec<Delivery>>,
    },
    Result {
        reply: oneshot::Sender<Option<MatchResult>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Cloneable handle to a running session task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

/// Move `session` onto its own task and return a handle to it.
pub fn spawn_session(session: MatchSession) -> (SessionHandle, JoinHandle<MatchSession>) {
    let (tx, rx) = mpsc::channel(REQUEST_BUFFER);
    let task = tokio::spawn(run(session, rx));
    (SessionHandle { tx }, task)
}

async fn wait_until(due: Option<Instant>) {
    match due {
        Some(due) => sleep_until(due).await,
        None => std::future::pending().await,
    }
}

async fn run(mut session: MatchSession, mut rx: mpsc::Receiver<Request>) -> MatchSession {
    info!(match_id = %session.state().header.match_id, "Session started");
    loop {
        let due = session.next_due().map(Instant::from_std);
        tokio::select! {
            request = rx.recv() => {
                match request {
                    None | Some(Request::Shutdown) => break,
                    Some(request) => handle(&mut session, request),
                }
            }
            _ = wait_until(due) => {
                if let Err(err) = session.fire_due(Instant::now().into_std()) {
                    warn!(error = %err, "Deferred transition rejected");
                }
            }
        }
    }
    info!(match_id = %session.state().header.match_id, "Session stopped");
    session
}

fn handle(session: &mut MatchSession, request: Request) {
    // A dropped receiver means the caller gave up; nothing to do.
    match request {
        Request::Execute { command, reply } => {
            let now = Instant::now().into_std();
            let _ = reply.send(session.execute_at(command, now));
        }
        Request::Snapshot { reply } => {
            let _ = reply.send(session.scoreboard());
        }
        Request::State { reply } => {
            let _ = reply.send(session.state().clone());
        }
        Request::Ledger { reply } => {
            let _ = reply.send(session.ledger().to_vec());
        }
        Request::Result { reply } => {
            let _ = reply.send(session.result().cloned());
        }
        Request::Reset { reply } => {
            session.reset();
            let _ = reply.send(());
        }
        Request::Shutdown => {}
    }
}

impl SessionHandle {
    async fn ask<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, AppError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| AppError::SessionClosed)?;
        rx.await.map_err(|_| AppError::SessionClosed)
    }

    pub async fn execute(&self, command: MatchCommand) -> Result<MatchUpdate, AppError> {
        self.ask(|reply| Request::Execute { command, reply }).await?
    }

    pub async fn snapshot(&self) -> Result<Scoreboard, AppError> {
        self.ask(|reply| Request::Snapshot { reply }).await
    }

    pub async fn state(&self) -> Result<MatchState, AppError> {
        self.ask(|reply| Request::State { reply }).await
    }

    pub async fn ledger(&self) -> Result<Vec<Delivery>, AppError> {
        self.ask(|reply| Request::Ledger { reply }).await
    }

    pub async fn result(&self) -> Result<Option<MatchResult>, AppError> {
        self.ask(|reply| Request::Result { reply }).await
    }

    pub async fn reset(&self) -> Result<(), AppError> {
        self.ask(|reply| Request::Reset { reply }).await
    }

    /// Ask the task to stop. Pending deferred transitions are dropped.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.tx
            .send(Request::Shutdown)
            .await
            .map_err(|_| AppError::SessionClosed)
    }
}
