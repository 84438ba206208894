//! Deterministic turn-resolution rules for a two-piece arena.
//!
//! `arena-core` defines the reference transition function: given a committed
//! board, a proposed move, and a seed, it produces the unique next committed
//! board. Interactive simulators and external verifiers must compute exactly
//! the same thing. All state mutation flows through [`engine::TurnEngine`];
//! the crate performs no I/O.
pub mod action;
pub mod combat;
pub mod commitment;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{CardinalDirection, InputError, Move, MoveError, MoveResolution, Side};
pub use combat::{CombatResolver, DamageRoll, DiceRng, PcgStream, resolve_damage, roll_damage};
pub use commitment::{
    Commitment, CommitmentScheme, DigestScheme, HashAlgorithm, Sha256Scheme, Sha512_256Scheme,
};
pub use config::GameConfig;
pub use engine::{
    BoardOutputs, ErrorKind, TransitionError, TransitionPhase, TransitionPhaseError, TurnAction,
    TurnEngine, TurnInput, TurnOutcome, TurnWitness,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BoardSetup, BoardState, CodecError, Coordinate, EncodedPosition, PieceState, PieceStats,
    decode, encode,
};
