//! Error types for the turn transition pipeline.

use core::fmt;

use crate::action::{InputError, MoveError};
use crate::commitment::Commitment;
use crate::error::{ErrorSeverity, GameError};
use crate::state::CodecError;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: fmt::Display> fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: fmt::Display + fmt::Debug> core::error::Error for TransitionPhaseError<E> {}

/// Coarse classification of a [`TransitionError`], matching the error
/// taxonomy external callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    OutOfBounds,
    IllegalPosition,
    CommitmentMismatch,
    Malformed,
}

/// Errors surfaced while creating boards or applying turns.
///
/// Every error is terminal for the call that raised it: no partially
/// updated state is ever returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionError {
    #[error("invalid starting position: {0}")]
    Setup(#[from] CodecError),

    #[error("invalid starting placement: {0}")]
    Placement(MoveError),

    #[error("move failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("claimed prior commitment {claimed} does not match {actual}")]
    CommitmentMismatch {
        claimed: Commitment,
        actual: Commitment,
    },

    #[error("malformed turn input: {0}")]
    Input(#[from] InputError),

    #[error("expected a genesis board, got nonce {nonce} chained from a prior state")]
    NotGenesis { nonce: u64 },

    #[error("nonce {0} cannot be advanced")]
    NonceExhausted(u64),

    #[error("witness outputs do not match the replayed transition")]
    WitnessMismatch,
}

impl TransitionError {
    pub(crate) fn mismatch(claimed: Commitment, actual: Commitment) -> Self {
        Self::CommitmentMismatch { claimed, actual }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransitionError::Setup(CodecError::OutOfBounds { .. }) => ErrorKind::OutOfBounds,
            TransitionError::Setup(CodecError::InvalidEncoding(_)) => ErrorKind::Malformed,
            TransitionError::Placement(err) => move_kind(err),
            TransitionError::Move(err) => move_kind(&err.error),
            TransitionError::CommitmentMismatch { .. }
            | TransitionError::NotGenesis { .. }
            | TransitionError::WitnessMismatch => ErrorKind::CommitmentMismatch,
            TransitionError::Input(_) | TransitionError::NonceExhausted(_) => ErrorKind::Malformed,
        }
    }

    /// Pipeline phase that failed, for move errors.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            TransitionError::Move(err) => Some(err.phase),
            _ => None,
        }
    }
}

fn move_kind(err: &MoveError) -> ErrorKind {
    match err {
        MoveError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
        MoveError::IllegalPosition { .. } => ErrorKind::IllegalPosition,
    }
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TransitionError::Move(err) => err.error.severity(),
            TransitionError::Setup(_)
            | TransitionError::Placement(_)
            | TransitionError::Input(_)
            | TransitionError::NonceExhausted(_) => ErrorSeverity::Validation,
            TransitionError::CommitmentMismatch { .. }
            | TransitionError::NotGenesis { .. }
            | TransitionError::WitnessMismatch => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TransitionError::Setup(_) => "TRANSITION_SETUP",
            TransitionError::Placement(_) => "TRANSITION_PLACEMENT",
            TransitionError::Move(_) => "TRANSITION_MOVE",
            TransitionError::CommitmentMismatch { .. } => "TRANSITION_COMMITMENT_MISMATCH",
            TransitionError::Input(_) => "TRANSITION_INPUT",
            TransitionError::NotGenesis { .. } => "TRANSITION_NOT_GENESIS",
            TransitionError::NonceExhausted(_) => "TRANSITION_NONCE_EXHAUSTED",
            TransitionError::WitnessMismatch => "TRANSITION_WITNESS_MISMATCH",
        }
    }
}
