//! Guarded submission flow for one session.

use std::sync::OnceLock;

use tracing::{debug, info, warn};

use arena_core::Commitment;

use crate::guard::{SubmissionGuard, SubmissionState};
use crate::traits::{CheckpointLedger, LedgerError};
use crate::types::{LedgerSessionId, TransactionId};

/// Drives one session through `start` and `complete` on a ledger.
///
/// Each step runs at most once. A concurrent duplicate fails fast with
/// [`LedgerError::SubmissionInFlight`]; a failed step can be retried.
pub struct SessionSubmitter<L> {
    ledger: L,
    start: SubmissionGuard,
    complete: SubmissionGuard,
    session: OnceLock<LedgerSessionId>,
}

impl<L: CheckpointLedger> SessionSubmitter<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            start: SubmissionGuard::new(),
            complete: SubmissionGuard::new(),
            session: OnceLock::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Ledger id once [`start`](Self::start) succeeded.
    pub fn session_id(&self) -> Option<&LedgerSessionId> {
        self.session.get()
    }

    pub fn is_completed(&self) -> bool {
        self.complete.state() == SubmissionState::Committed
    }

    /// Records the genesis commitment.
    pub async fn start(
        &self,
        board_id: u64,
        genesis: Commitment,
    ) -> Result<LedgerSessionId, LedgerError> {
        let ticket = self.start.begin()?;
        let id = self
            .ledger
            .start_session(board_id, genesis)
            .await
            .inspect_err(|error| warn!(board_id, %error, "Ledger session start failed"))?;

        let id = self.session.get_or_init(|| id).clone();
        ticket.commit();
        info!(board_id, session = %id, genesis = %genesis.short(), "Ledger session started");
        Ok(id)
    }

    /// Dry-runs the completion, then records the final commitment.
    pub async fn complete(&self, final_commitment: Commitment) -> Result<TransactionId, LedgerError> {
        let session = self.session.get().ok_or(LedgerError::NotStarted)?;
        let ticket = self.complete.begin()?;

        self.ledger
            .simulate_complete(session, &final_commitment)
            .await
            .inspect_err(|error| warn!(%session, %error, "Ledger dry run rejected completion"))?;
        debug!(%session, "Ledger dry run passed");

        let tx = self
            .ledger
            .complete_session(session, final_commitment)
            .await
            .inspect_err(|error| warn!(%session, %error, "Ledger completion failed"))?;

        ticket.commit();
        info!(
            %session,
            transaction = %tx,
            checkpoint = %final_commitment.short(),
            "Ledger session completed"
        );
        Ok(tx)
    }
}
