//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, the engine, and
//! session policy so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::{Side, TransitionError};

pub use crate::repository::RepositoryError;
use crate::session::SessionId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("turn rejected: {0}")]
    Transition(#[from] TransitionError),

    #[error("game is over ({})", winner.map_or("draw".to_string(), |side| format!("{side} won")))]
    GameOver { winner: Option<Side> },

    #[error("turn budget of {max_turns} turns exhausted")]
    TurnBudgetExhausted { max_turns: u32 },

    #[error("it is {expected}'s turn, not {got}'s")]
    OutOfTurn { expected: Side, got: Side },

    #[error("{0} not found")]
    SessionNotFound(SessionId),

    #[error("move provider failed: {0}")]
    Provider(String),
}

impl RuntimeError {
    /// True for refusals that mean the session will not accept more turns.
    pub fn is_session_over(&self) -> bool {
        matches!(
            self,
            RuntimeError::GameOver { .. } | RuntimeError::TurnBudgetExhausted { .. }
        )
    }
}
