use crate::state::{BoardState, Coordinate};

use super::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("moving {direction} from {from} leaves the board")]
    OutOfBounds {
        from: Coordinate,
        direction: CardinalDirection,
    },

    #[error("{side} would share tile {position} with its opponent")]
    IllegalPosition { side: Side, position: Coordinate },
}

#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum CardinalDirection {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    /// Unit step on the board. North increases `y`.
    pub fn delta(self) -> (i64, i64) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CardinalDirection {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(code)).copied().ok_or(code)
    }
}

/// Effect of one move on the mover, before any damage is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResolution {
    pub side: Side,
    pub from: Coordinate,
    /// Mover's position after the move; equal to `from` when attacking.
    pub to: Coordinate,
    /// The destination held the opponent, so the move became an attack.
    pub attack: bool,
}

/// Computes where `side` ends up after stepping in `direction`.
///
/// Stepping onto the opponent's tile is reinterpreted as an attack and
/// leaves the mover in place. Damage is resolved by the caller.
pub fn apply_move(
    state: &BoardState,
    side: Side,
    direction: CardinalDirection,
) -> Result<MoveResolution, MoveError> {
    let from = state.piece(side).position;
    let opponent = state.piece(side.opponent()).position;

    ensure_separated(side, from, opponent)?;

    let candidate = from
        .step(direction)
        .map_err(|_| MoveError::OutOfBounds { from, direction })?;

    let resolution = if candidate == opponent {
        MoveResolution {
            side,
            from,
            to: from,
            attack: true,
        }
    } else {
        MoveResolution {
            side,
            from,
            to: candidate,
            attack: false,
        }
    };

    ensure_separated(side, resolution.to, opponent)?;
    Ok(resolution)
}

/// Fails when two pieces would occupy the same tile.
pub fn ensure_separated(
    side: Side,
    position: Coordinate,
    opponent: Coordinate,
) -> Result<(), MoveError> {
    if position == opponent {
        return Err(MoveError::IllegalPosition { side, position });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::Commitment;
    use crate::state::PieceState;

    fn board(player: (i64, i64), enemy: (i64, i64)) -> BoardState {
        BoardState {
            nonce: 1,
            board_id: 1,
            player: PieceState::new(Coordinate::new(player.0, player.1).unwrap(), 20),
            enemy: PieceState::new(Coordinate::new(enemy.0, enemy.1).unwrap(), 10),
            previous: None,
            commitment: Commitment::ZERO,
        }
    }

    #[test]
    fn each_direction_moves_one_tile() {
        let state = board((4, 1), (8, 9));
        let expected = [
            (CardinalDirection::North, (4, 2)),
            (CardinalDirection::East, (5, 1)),
            (CardinalDirection::South, (4, 0)),
            (CardinalDirection::West, (3, 1)),
        ];
        for (direction, (x, y)) in expected {
            let resolution = apply_move(&state, Side::Player, direction).unwrap();
            assert_eq!(resolution.to, Coordinate::new(x, y).unwrap());
            assert!(!resolution.attack);
        }
    }

    #[test]
    fn stepping_onto_opponent_becomes_attack() {
        let state = board((2, 4), (2, 5));
        let resolution = apply_move(&state, Side::Player, CardinalDirection::North).unwrap();
        assert!(resolution.attack);
        assert_eq!(resolution.to, resolution.from);

        let resolution = apply_move(&state, Side::Enemy, CardinalDirection::South).unwrap();
        assert!(resolution.attack);
        assert_eq!(resolution.to, Coordinate::new(2, 5).unwrap());
    }

    #[test]
    fn leaving_the_board_is_rejected() {
        let state = board((0, 0), (8, 9));
        let err = apply_move(&state, Side::Player, CardinalDirection::South).unwrap_err();
        assert_eq!(
            err,
            MoveError::OutOfBounds {
                from: Coordinate::ORIGIN,
                direction: CardinalDirection::South,
            }
        );
    }

    #[test]
    fn overlapping_board_is_illegal() {
        // Only reachable with a forged board.
        let state = board((3, 3), (3, 3));
        let err = apply_move(&state, Side::Player, CardinalDirection::North).unwrap_err();
        assert!(matches!(err, MoveError::IllegalPosition { .. }));
    }

    #[test]
    fn direction_codes_round_trip() {
        for direction in CardinalDirection::ALL {
            assert_eq!(CardinalDirection::try_from(direction.code()), Ok(direction));
        }
        assert_eq!(CardinalDirection::try_from(4), Err(4));
        assert_eq!("NORTH".parse::<CardinalDirection>(), Ok(CardinalDirection::North));
    }
}
