//! Authoritative board state representation.
//!
//! This module owns the data structures that describe pieces, positions,
//! and committed boards. Callers clone or inspect this state but produce
//! new states exclusively through the engine.
mod board;
mod piece;
pub mod position;

pub use board::{BoardSetup, BoardState};
pub use piece::{PieceState, PieceStats};
pub use position::{CodecError, Coordinate, EncodedPosition, decode, encode};
