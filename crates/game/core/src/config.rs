//! Game configuration constants and tunable parameters.

use crate::state::PieceStats;

/// Rule parameters shared by every board evaluated with the same engine.
///
/// Two parties that verify each other's transitions must agree on every
/// field here; a mismatch produces diverging commitments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of faces on each damage die.
    pub dice_sides: u32,
    /// Stats assigned to the player when a board is created without overrides.
    pub player_stats: PieceStats,
    /// Stats assigned to the enemy when a board is created without overrides.
    pub enemy_stats: PieceStats,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Largest legal value of either coordinate component (inclusive).
    pub const BOARD_MAX: u32 = 10;
    /// Multiplier separating `x` from `y` in a packed position.
    pub const SCALE: u32 = 1000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DICE_SIDES: u32 = 6;
    pub const DEFAULT_ATTACK: u32 = 1;
    pub const DEFAULT_DEFENSE: u32 = 0;

    pub fn new() -> Self {
        Self {
            dice_sides: Self::DEFAULT_DICE_SIDES,
            player_stats: PieceStats::default(),
            enemy_stats: PieceStats::default(),
        }
    }

    pub fn with_dice_sides(dice_sides: u32) -> Self {
        Self {
            dice_sides,
            ..Self::new()
        }
    }

    /// Highest raw damage a piece with `attack` dice can ever roll.
    pub fn max_raw_damage(&self, attack: u32) -> u32 {
        if attack == 0 {
            return 0;
        }
        self.dice_sides.saturating_add(attack - 1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

// The packed encoding must never carry `y` into the `x` digit range.
const _: () = assert!(GameConfig::BOARD_MAX < GameConfig::SCALE);
