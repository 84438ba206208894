//! In-memory ledger for offline play and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use arena_core::Commitment;

use crate::traits::{CheckpointLedger, LedgerError};
use crate::types::{LedgerSession, LedgerSessionId, SessionStatus, TransactionId};

/// Mock ledger that simulates checkpoint storage without a network.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct MockLedger {
    sessions: Arc<Mutex<HashMap<LedgerSessionId, LedgerSession>>>,
    transaction_counter: Arc<AtomicU64>,
    reject_completions: Arc<AtomicBool>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following completion fail with [`LedgerError::Rejected`].
    pub fn set_reject_completions(&self, reject: bool) {
        self.reject_completions.store(reject, Ordering::Relaxed);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn next_sequence(&self) -> u64 {
        self.transaction_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn next_tx_id(&self) -> TransactionId {
        TransactionId::from_bytes(self.next_sequence().to_be_bytes().to_vec())
    }

    fn check_completable(
        session: Option<&LedgerSession>,
        id: &LedgerSessionId,
    ) -> Result<(), LedgerError> {
        match session {
            None => Err(LedgerError::SessionNotFound(id.clone())),
            Some(session) if session.status == SessionStatus::Completed => {
                Err(LedgerError::SessionCompleted(id.clone()))
            }
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl CheckpointLedger for MockLedger {
    async fn start_session(
        &self,
        board_id: u64,
        genesis: Commitment,
    ) -> Result<LedgerSessionId, LedgerError> {
        let mut bytes = board_id.to_be_bytes().to_vec();
        bytes.extend_from_slice(&self.next_sequence().to_be_bytes());
        let session_id = LedgerSessionId::from_bytes(bytes);

        let session = LedgerSession {
            session_id: session_id.clone(),
            board_id,
            genesis,
            checkpoint: genesis,
            status: SessionStatus::Active,
            completed_by: None,
        };
        self.sessions
            .lock()
            .await
            .insert(session_id.clone(), session);

        Ok(session_id)
    }

    async fn simulate_complete(
        &self,
        session: &LedgerSessionId,
        _final_commitment: &Commitment,
    ) -> Result<(), LedgerError> {
        let sessions = self.sessions.lock().await;
        Self::check_completable(sessions.get(session), session)
    }

    async fn complete_session(
        &self,
        session: &LedgerSessionId,
        final_commitment: Commitment,
    ) -> Result<TransactionId, LedgerError> {
        if self.reject_completions.load(Ordering::Relaxed) {
            return Err(LedgerError::Rejected("completion rejected by mock".into()));
        }

        let mut sessions = self.sessions.lock().await;
        Self::check_completable(sessions.get(session), session)?;

        let tx_id = self.next_tx_id();
        if let Some(entry) = sessions.get_mut(session) {
            entry.checkpoint = final_commitment;
            entry.status = SessionStatus::Completed;
            entry.completed_by = Some(tx_id.clone());
        }
        Ok(tx_id)
    }

    async fn checkpoint(&self, session: &LedgerSessionId) -> Result<Commitment, LedgerError> {
        self.session(session).await.map(|session| session.checkpoint)
    }

    async fn session(&self, session: &LedgerSessionId) -> Result<LedgerSession, LedgerError> {
        self.sessions
            .lock()
            .await
            .get(session)
            .cloned()
            .ok_or_else(|| LedgerError::SessionNotFound(session.clone()))
    }
}
