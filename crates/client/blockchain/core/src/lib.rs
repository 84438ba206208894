//! Ledger abstraction for arena sessions.
//!
//! A ledger stores one commitment per session as its authoritative
//! checkpoint: the genesis commitment when a session starts and the final
//! commitment when it completes. Full board state never leaves the client.
//!
//! # Architecture
//!
//! ```text
//! SessionSubmitter   (one session: guarded start + dry-run + complete)
//!   ├── SubmissionGuard  (Idle → Submitting → Committed)
//!   └── CheckpointLedger (backend trait)
//!         └── MockLedger (in-memory, offline mode and tests)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use arena_ledger::{MockLedger, SessionSubmitter};
//!
//! let submitter = SessionSubmitter::new(MockLedger::new());
//! submitter.start(genesis.board_id, genesis.commitment).await?;
//! // ... play the session ...
//! submitter.complete(last.commitment).await?;
//! ```

pub mod guard;
pub mod mock;
pub mod submitter;
pub mod traits;
pub mod types;

pub use guard::{SubmissionGuard, SubmissionState, SubmissionTicket};
pub use mock::MockLedger;
pub use submitter::SessionSubmitter;
pub use traits::{CheckpointLedger, LedgerError};
pub use types::{LedgerSession, LedgerSessionId, SessionStatus, TransactionId};
