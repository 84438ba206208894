//! Ledger backend trait and its error type.

use async_trait::async_trait;

use arena_core::Commitment;

use crate::types::{LedgerSession, LedgerSessionId, TransactionId};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Session not found: {0}")]
    SessionNotFound(LedgerSessionId),

    #[error("Session already completed: {0}")]
    SessionCompleted(LedgerSessionId),

    #[error("Session has not been started")]
    NotStarted,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Submission already committed")]
    AlreadyCommitted,

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Backend that persists session checkpoints.
///
/// Implementations store commitments only. They never see board state and
/// cannot tell a valid chain from an invalid one; verification happens off
/// the ledger by replaying witnesses.
#[async_trait]
pub trait CheckpointLedger: Send + Sync {
    /// Record a new session anchored at its genesis commitment.
    async fn start_session(
        &self,
        board_id: u64,
        genesis: Commitment,
    ) -> Result<LedgerSessionId, LedgerError>;

    /// Dry-run [`complete_session`](Self::complete_session) without
    /// changing anything.
    async fn simulate_complete(
        &self,
        session: &LedgerSessionId,
        final_commitment: &Commitment,
    ) -> Result<(), LedgerError>;

    /// Replace the session checkpoint with its final commitment.
    async fn complete_session(
        &self,
        session: &LedgerSessionId,
        final_commitment: Commitment,
    ) -> Result<TransactionId, LedgerError>;

    /// Current checkpoint of a session.
    async fn checkpoint(&self, session: &LedgerSessionId) -> Result<Commitment, LedgerError>;

    /// Full ledger record of a session.
    async fn session(&self, session: &LedgerSessionId) -> Result<LedgerSession, LedgerError>;
}
