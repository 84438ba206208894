//! Common types for ledger interactions.

use std::fmt;

use serde::{Deserialize, Serialize};

use arena_core::Commitment;

/// Ledger-specific session identifier (object id, contract key, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerSessionId(pub Vec<u8>);

impl LedgerSessionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for LedgerSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Generic transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Started; the checkpoint is the genesis commitment.
    Active,
    /// Completed; the checkpoint is the final commitment.
    Completed,
}

/// What the ledger knows about one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSession {
    pub session_id: LedgerSessionId,
    pub board_id: u64,
    pub genesis: Commitment,
    /// Latest authoritative commitment.
    pub checkpoint: Commitment,
    pub status: SessionStatus,
    pub completed_by: Option<TransactionId>,
}
