//! Single-turn transition and its three-phase pipeline.

use crate::action::{CardinalDirection, MoveError, Side, apply_move, ensure_separated};
use crate::combat::CombatResolver;
use crate::state::BoardState;

use super::TurnAction;
use super::errors::{TransitionPhase, TransitionPhaseError};

/// One turn's worth of board mutation. Commitment handling and nonce
/// advancement live in the engine; this only touches pieces.
pub(super) struct TurnTransition<'a> {
    pub side: Side,
    pub direction: CardinalDirection,
    pub seed: u64,
    pub combat: &'a CombatResolver,
}

impl TurnTransition<'_> {
    fn pre_validate(&self, state: &BoardState) -> Result<(), MoveError> {
        ensure_separated(
            self.side,
            state.piece(self.side).position,
            state.piece(self.side.opponent()).position,
        )
    }

    fn apply(&self, state: &mut BoardState) -> Result<TurnAction, MoveError> {
        let resolution = apply_move(state, self.side, self.direction)?;

        if !resolution.attack {
            state.piece_mut(self.side).position = resolution.to;
            return Ok(TurnAction::Moved {
                from: resolution.from,
                to: resolution.to,
            });
        }

        let target = self.side.opponent();
        let attack = state.piece(self.side).stats.attack;
        let defender = state.piece_mut(target);
        let roll = self
            .combat
            .roll(self.seed, attack, defender.hp, defender.stats.defense);
        defender.hp = roll.hp_after;

        Ok(TurnAction::Attacked { target, roll })
    }

    fn post_validate(&self, state: &BoardState) -> Result<(), MoveError> {
        ensure_separated(
            self.side,
            state.piece(self.side).position,
            state.piece(self.side.opponent()).position,
        )
    }
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the board and report what happened
/// 3. `post_validate` - Verify postconditions after mutation
///
/// `state` may be partially mutated on error; callers work on a scratch copy.
#[inline]
pub(super) fn drive_transition(
    transition: &TurnTransition<'_>,
    state: &mut BoardState,
) -> Result<TurnAction, TransitionPhaseError<MoveError>> {
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let action = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(action)
}
