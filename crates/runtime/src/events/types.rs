//! Event types for different topics.

use serde::{Deserialize, Serialize};

use arena_core::{CardinalDirection, Commitment, ErrorKind, Side, TransitionPhase, TurnWitness};

use crate::session::{EndReason, SessionId, TurnRecord};

/// Events related to turn resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A turn was accepted and the chain advanced.
    TurnApplied {
        session: SessionId,
        record: TurnRecord,
        /// Full input/output record for external verification.
        witness: Box<TurnWitness>,
    },

    /// A turn was refused, either by session policy or by the engine.
    TurnRejected {
        session: SessionId,
        side: Side,
        direction: CardinalDirection,
        /// Engine error class; `None` for policy refusals.
        kind: Option<ErrorKind>,
        phase: Option<TransitionPhase>,
        error: String,
    },
}

/// Events related to session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    SessionStarted {
        session: SessionId,
        board_id: u64,
        genesis: Commitment,
    },

    SessionEnded {
        session: SessionId,
        reason: EndReason,
        nonce: u64,
        final_commitment: Commitment,
    },
}
