//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (`CodecError`, `MoveError`, `TransitionError`) are
//! defined next to the rules they enforce. This module provides the shared
//! severity classification callers use to decide how to react.

use crate::action::{InputError, MoveError};
use crate::state::CodecError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the input was legal in form but not on this board;
///   the caller may prompt for a different move
/// - **Validation**: malformed input that should be rejected without retry
/// - **Fatal**: the caller's view of the chain is wrong or forged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: moving off the board edge, stepping onto the opponent's
    /// tile outside an attack.
    Recoverable,

    /// Examples: turn indicator other than 0 or 1, unknown move code.
    Validation,

    /// Examples: claimed prior commitment differs from the chain.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all arena-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, stable across releases.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl GameError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CodecError::OutOfBounds { .. } => "CODEC_OUT_OF_BOUNDS",
            CodecError::InvalidEncoding(_) => "CODEC_INVALID_ENCODING",
        }
    }
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::OutOfBounds { .. } => ErrorSeverity::Recoverable,
            // Unreachable from a board the engine produced.
            MoveError::IllegalPosition { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::IllegalPosition { .. } => "MOVE_ILLEGAL_POSITION",
        }
    }
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            InputError::InvalidTurn(_) => "INPUT_INVALID_TURN",
            InputError::InvalidDirection(_) => "INPUT_INVALID_DIRECTION",
        }
    }
}
