//! Session-level policies and records.
//!
//! The engine validates single transitions only. Everything that spans a
//! whole game (whose turn it is, how many turns remain, when the game is
//! over) is decided here and enforced by the session worker.

use std::fmt;

use serde::{Deserialize, Serialize};

use arena_core::{
    CardinalDirection, Commitment, Coordinate, Side, TurnAction, TurnInput, TurnOutcome,
};

/// Identifier of one running game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Whether a session requires player and enemy turns to alternate.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnOrder {
    #[default]
    Alternating,
    Free,
}

/// Caller-level rules applied on top of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPolicy {
    /// Accepted turns per session before further turns are refused.
    pub max_turns: u32,
    pub turn_order: TurnOrder,
    /// Side expected to act first under [`TurnOrder::Alternating`].
    pub first_turn: Side,
}

impl SessionPolicy {
    pub const DEFAULT_MAX_TURNS: u32 = 50;

    /// Side that must act next, if the order is enforced.
    pub fn expected_turn(&self, last: Option<Side>) -> Option<Side> {
        match self.turn_order {
            TurnOrder::Free => None,
            TurnOrder::Alternating => Some(last.map_or(self.first_turn, Side::opponent)),
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            turn_order: TurnOrder::default(),
            first_turn: Side::Player,
        }
    }
}

/// One accepted turn in a session's move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Nonce of the board this turn produced.
    pub nonce: u64,
    pub side: Side,
    pub direction: CardinalDirection,
    pub seed: u64,
    /// Mover's position after the turn.
    pub position: Coordinate,
    pub attacked: bool,
    /// Hit points removed from the opponent.
    pub damage: u32,
    pub commitment: Commitment,
}

impl TurnRecord {
    pub fn new(input: TurnInput, outcome: &TurnOutcome) -> Self {
        Self {
            nonce: outcome.state.nonce,
            side: input.turn,
            direction: input.direction,
            seed: input.seed,
            position: outcome.state.piece(input.turn).position,
            attacked: matches!(outcome.action, TurnAction::Attacked { .. }),
            damage: outcome.action.damage(),
            commitment: outcome.state.commitment,
        }
    }
}

/// Why a session stopped accepting turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// One piece reached zero hit points.
    Defeat { winner: Side },
    /// The turn budget was used up.
    TurnBudget,
    /// The session was shut down before finishing.
    Shutdown,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Defeat { winner } => write!(f, "{winner} won"),
            EndReason::TurnBudget => f.write_str("turn budget exhausted"),
            EndReason::Shutdown => f.write_str("shut down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_starts_with_first_turn() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.expected_turn(None), Some(Side::Player));
        assert_eq!(policy.expected_turn(Some(Side::Player)), Some(Side::Enemy));
        assert_eq!(policy.expected_turn(Some(Side::Enemy)), Some(Side::Player));

        let free = SessionPolicy {
            turn_order: TurnOrder::Free,
            ..policy
        };
        assert_eq!(free.expected_turn(Some(Side::Player)), None);
    }

    #[test]
    fn turn_order_parses_from_env_strings() {
        assert_eq!("free".parse::<TurnOrder>(), Ok(TurnOrder::Free));
        assert_eq!("Alternating".parse::<TurnOrder>(), Ok(TurnOrder::Alternating));
    }
}
