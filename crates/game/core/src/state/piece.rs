use core::fmt;

use super::Coordinate;
use crate::config::GameConfig;

/// Combat attributes of a piece, fixed for the lifetime of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceStats {
    /// Number of dice rolled when attacking.
    pub attack: u32,
    /// Flat reduction applied to incoming raw damage.
    pub defense: u32,
}

impl PieceStats {
    pub const fn new(attack: u32, defense: u32) -> Self {
        Self { attack, defense }
    }
}

impl Default for PieceStats {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_ATTACK, GameConfig::DEFAULT_DEFENSE)
    }
}

/// Position and health of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceState {
    pub position: Coordinate,
    /// Remaining hit points. Never negative; zero means defeated.
    pub hp: u32,
    pub stats: PieceStats,
}

impl PieceState {
    pub fn new(position: Coordinate, hp: u32) -> Self {
        Self {
            position,
            hp,
            stats: PieceStats::default(),
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: PieceStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Words bound into the commitment, in canonical order.
    pub(crate) fn commitment_words(&self) -> [u64; 4] {
        [
            u64::from(self.position.encode()),
            u64::from(self.hp),
            u64::from(self.stats.attack),
            u64::from(self.stats.defense),
        ]
    }
}

impl fmt::Display for PieceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hp={}", self.position, self.hp)
    }
}
