//! Witness export for external verification.
//!
//! A [`TurnWitness`] is everything a verifier needs to re-evaluate one turn:
//! the prior board, the claimed prior commitment, the turn inputs, and the
//! resulting public outputs in their fixed positional order.

use crate::action::{CardinalDirection, InputError, Move, Side};
use crate::commitment::Commitment;
use crate::state::{BoardState, EncodedPosition};

use super::{TurnAction, TurnOutcome};

/// Inputs of one turn besides the prior state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnInput {
    pub turn: Side,
    pub direction: CardinalDirection,
    pub seed: u64,
}

impl TurnInput {
    pub const fn new(turn: Side, direction: CardinalDirection, seed: u64) -> Self {
        Self {
            turn,
            direction,
            seed,
        }
    }

    /// Decodes the numeric turn/move codes used on the wire.
    pub fn from_codes(turn: u8, direction: u8, seed: u64) -> Result<Self, InputError> {
        let Move { turn, direction } = Move::from_codes(turn, direction)?;
        Ok(Self::new(turn, direction, seed))
    }

    pub const fn as_move(&self) -> Move {
        Move::new(self.turn, self.direction)
    }
}

/// Public result fields of a board, in verifier order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardOutputs {
    pub nonce: u64,
    pub player_position: EncodedPosition,
    pub player_hp: u32,
    pub enemy_position: EncodedPosition,
    pub enemy_hp: u32,
    pub commitment: Commitment,
}

impl BoardOutputs {
    /// `[nonce, player position, player hp, enemy position, enemy hp]`;
    /// the commitment follows as the sixth output.
    pub fn words(&self) -> [u64; 5] {
        [
            self.nonce,
            u64::from(self.player_position),
            u64::from(self.player_hp),
            u64::from(self.enemy_position),
            u64::from(self.enemy_hp),
        ]
    }
}

/// Full input/output record of one evaluated turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnWitness {
    pub prior: BoardState,
    pub claimed_prior: Commitment,
    pub input: TurnInput,
    pub action: TurnAction,
    pub outputs: BoardOutputs,
}

impl TurnWitness {
    pub fn new(
        prior: BoardState,
        claimed_prior: Commitment,
        input: TurnInput,
        outcome: &TurnOutcome,
    ) -> Self {
        Self {
            prior,
            claimed_prior,
            input,
            action: outcome.action,
            outputs: outcome.state.outputs(),
        }
    }

    pub fn public_outputs(&self) -> &BoardOutputs {
        &self.outputs
    }
}
