use crate::action::Side;
use crate::commitment::Commitment;
use crate::engine::BoardOutputs;

use super::{PieceState, PieceStats};

/// Committed snapshot of a two-piece board.
///
/// `commitment` is a deterministic function of every other field; it is
/// only ever produced by the engine. `previous` is `None` for the genesis
/// state and holds the predecessor's commitment afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub nonce: u64,
    pub board_id: u64,
    pub player: PieceState,
    pub enemy: PieceState,
    pub previous: Option<Commitment>,
    pub commitment: Commitment,
}

impl BoardState {
    pub fn piece(&self, side: Side) -> &PieceState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn piece_mut(&mut self, side: Side) -> &mut PieceState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.previous.is_none()
    }

    /// True once either piece is defeated. The engine does not stop here;
    /// callers decide whether a terminal board accepts more turns.
    pub fn is_terminal(&self) -> bool {
        self.player.is_defeated() || self.enemy.is_defeated()
    }

    /// The surviving side of a terminal board.
    pub fn winner(&self) -> Option<Side> {
        match (self.player.is_defeated(), self.enemy.is_defeated()) {
            (false, true) => Some(Side::Player),
            (true, false) => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Result fields in the fixed positional order external verifiers read.
    pub fn outputs(&self) -> BoardOutputs {
        BoardOutputs {
            nonce: self.nonce,
            player_position: self.player.position.encode(),
            player_hp: self.player.hp,
            enemy_position: self.enemy.position.encode(),
            enemy_hp: self.enemy.hp,
            commitment: self.commitment,
        }
    }
}

/// Parameters for a genesis board.
///
/// Coordinates are accepted unvalidated here; the engine rejects anything
/// off the board when the setup is turned into a [`BoardState`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSetup {
    pub nonce: u64,
    pub board_id: u64,
    pub player_position: (i64, i64),
    pub enemy_position: (i64, i64),
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub player_stats: Option<PieceStats>,
    pub enemy_stats: Option<PieceStats>,
}

impl BoardSetup {
    pub fn new(
        nonce: u64,
        board_id: u64,
        player_position: (i64, i64),
        enemy_position: (i64, i64),
        player_hp: u32,
        enemy_hp: u32,
    ) -> Self {
        Self {
            nonce,
            board_id,
            player_position,
            enemy_position,
            player_hp,
            enemy_hp,
            player_stats: None,
            enemy_stats: None,
        }
    }

    #[must_use]
    pub fn with_player_stats(mut self, stats: PieceStats) -> Self {
        self.player_stats = Some(stats);
        self
    }

    #[must_use]
    pub fn with_enemy_stats(mut self, stats: PieceStats) -> Self {
        self.enemy_stats = Some(stats);
        self
    }
}
