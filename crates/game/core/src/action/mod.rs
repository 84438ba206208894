//! Turn inputs and movement rules.
//!
//! A turn is selected by a [`Side`] (whose piece moves) and a
//! [`CardinalDirection`]. [`movement::apply_move`] turns the pair into a
//! [`MoveResolution`]; the engine then resolves damage when the move became
//! an attack.
pub mod movement;

pub use movement::{CardinalDirection, MoveError, MoveResolution, apply_move, ensure_separated};

/// Which piece acts on a turn. Encoded as `0` (player) or `1` (enemy).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Side {
    #[default]
    Player = 0,
    Enemy = 1,
}

impl Side {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = InputError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Side::Player),
            1 => Ok(Side::Enemy),
            other => Err(InputError::InvalidTurn(other)),
        }
    }
}

/// Malformed wire-level turn inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputError {
    #[error("turn indicator {0} is neither 0 (player) nor 1 (enemy)")]
    InvalidTurn(u8),

    #[error("move code {0} is not a cardinal direction")]
    InvalidDirection(u8),
}

/// One proposed turn: which piece moves and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub turn: Side,
    pub direction: CardinalDirection,
}

impl Move {
    pub const fn new(turn: Side, direction: CardinalDirection) -> Self {
        Self { turn, direction }
    }

    /// Decodes the numeric form used by external verifiers.
    pub fn from_codes(turn: u8, direction: u8) -> Result<Self, InputError> {
        let turn = Side::try_from(turn)?;
        let direction =
            CardinalDirection::try_from(direction).map_err(InputError::InvalidDirection)?;
        Ok(Self { turn, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_codes_are_zero_and_one() {
        assert_eq!(Side::try_from(0), Ok(Side::Player));
        assert_eq!(Side::try_from(1), Ok(Side::Enemy));
        assert_eq!(Side::try_from(2), Err(InputError::InvalidTurn(2)));
        assert_eq!(Side::Player.opponent(), Side::Enemy);
    }

    #[test]
    fn move_from_codes_rejects_unknown_direction() {
        assert_eq!(
            Move::from_codes(0, 2),
            Ok(Move::new(Side::Player, CardinalDirection::South))
        );
        assert_eq!(Move::from_codes(0, 9), Err(InputError::InvalidDirection(9)));
        assert_eq!(Move::from_codes(7, 0), Err(InputError::InvalidTurn(7)));
    }
}
