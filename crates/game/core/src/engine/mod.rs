//! Turn resolution pipeline.
//!
//! The [`TurnEngine`] is the authoritative reducer for [`BoardState`]. It
//! gates every turn on the caller's claimed prior commitment, drives the
//! movement/combat transition through its phases, and advances the
//! commitment chain. The engine holds only immutable configuration, so one
//! instance can serve any number of independent boards from any thread.

mod errors;
mod transition;
mod witness;

pub use errors::{ErrorKind, TransitionError, TransitionPhase, TransitionPhaseError};
pub use witness::{BoardOutputs, TurnInput, TurnWitness};

use crate::action::{CardinalDirection, Side, ensure_separated};
use crate::combat::{CombatResolver, DamageRoll};
use crate::commitment::{
    Commitment, CommitmentScheme, HashAlgorithm, chained_commitment, expected_commitment,
    genesis_commitment,
};
use crate::config::GameConfig;
use crate::state::{BoardSetup, BoardState, Coordinate, PieceState};

use transition::{TurnTransition, drive_transition};

/// What a single accepted turn did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnAction {
    Moved { from: Coordinate, to: Coordinate },
    Attacked { target: Side, roll: DamageRoll },
}

impl TurnAction {
    pub fn is_attack(&self) -> bool {
        matches!(self, TurnAction::Attacked { .. })
    }

    /// Hit points removed from the target; zero for plain moves.
    pub fn damage(&self) -> u32 {
        match self {
            TurnAction::Moved { .. } => 0,
            TurnAction::Attacked { roll, .. } => roll.hp_before - roll.hp_after,
        }
    }
}

/// Complete outcome of applying one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub state: BoardState,
    pub action: TurnAction,
}

/// Reference transition function over committed boards.
///
/// Every turn flows through the same path:
/// commitment gate → pre_validate → apply → post_validate → chain advance.
///
/// Either a complete, freshly committed [`BoardState`] is returned or an
/// error is; the input state is never modified.
#[derive(Clone, Debug)]
pub struct TurnEngine<S = HashAlgorithm> {
    config: GameConfig,
    combat: CombatResolver,
    scheme: S,
}

impl TurnEngine<HashAlgorithm> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_scheme(config, HashAlgorithm::default())
    }
}

impl Default for TurnEngine<HashAlgorithm> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<S: CommitmentScheme> TurnEngine<S> {
    pub fn with_scheme(config: GameConfig, scheme: S) -> Self {
        let combat = CombatResolver::from_config(&config);
        Self {
            config,
            combat,
            scheme,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn combat(&self) -> &CombatResolver {
        &self.combat
    }

    /// Creates a genesis board with the configured default stats.
    pub fn create_board(
        &self,
        nonce: u64,
        board_id: u64,
        player_position: (i64, i64),
        enemy_position: (i64, i64),
        player_hp: u32,
        enemy_hp: u32,
    ) -> Result<BoardState, TransitionError> {
        self.create_board_from(&BoardSetup::new(
            nonce,
            board_id,
            player_position,
            enemy_position,
            player_hp,
            enemy_hp,
        ))
    }

    /// Creates a genesis board from a full setup, including stat overrides.
    pub fn create_board_from(&self, setup: &BoardSetup) -> Result<BoardState, TransitionError> {
        let player_position = Coordinate::try_from(setup.player_position)?;
        let enemy_position = Coordinate::try_from(setup.enemy_position)?;
        ensure_separated(Side::Enemy, enemy_position, player_position)
            .map_err(TransitionError::Placement)?;

        let player = PieceState::new(player_position, setup.player_hp)
            .with_stats(setup.player_stats.unwrap_or(self.config.player_stats));
        let enemy = PieceState::new(enemy_position, setup.enemy_hp)
            .with_stats(setup.enemy_stats.unwrap_or(self.config.enemy_stats));

        let commitment =
            genesis_commitment(&self.scheme, setup.nonce, setup.board_id, &player, &enemy);

        Ok(BoardState {
            nonce: setup.nonce,
            board_id: setup.board_id,
            player,
            enemy,
            previous: None,
            commitment,
        })
    }

    /// Applies one turn to `state`.
    ///
    /// `claimed_prior` must equal `state.commitment`, and `state` must
    /// reproduce that commitment from its own fields; anything else is
    /// rejected with [`TransitionError::CommitmentMismatch`].
    pub fn apply_turn(
        &self,
        state: &BoardState,
        claimed_prior: &Commitment,
        turn: Side,
        direction: CardinalDirection,
        seed: u64,
    ) -> Result<TurnOutcome, TransitionError> {
        self.verify_claim(state, claimed_prior)?;
        self.advance(state, TurnInput::new(turn, direction, seed))
    }

    /// [`apply_turn`](Self::apply_turn) claiming the commitment `state`
    /// carries, returning only the new board.
    pub fn apply_turn_state(
        &self,
        state: &BoardState,
        turn: Side,
        direction: CardinalDirection,
        seed: u64,
    ) -> Result<BoardState, TransitionError> {
        self.apply_turn(state, &state.commitment, turn, direction, seed)
            .map(|outcome| outcome.state)
    }

    /// [`apply_turn`](Self::apply_turn) taking the numeric turn (0/1) and
    /// move (0..=3) codes used by external verifiers.
    pub fn apply_encoded(
        &self,
        state: &BoardState,
        claimed_prior: &Commitment,
        turn: u8,
        direction: u8,
        seed: u64,
    ) -> Result<TurnOutcome, TransitionError> {
        let input = TurnInput::from_codes(turn, direction, seed)?;
        self.apply_turn(state, claimed_prior, input.turn, input.direction, input.seed)
    }

    /// Evaluates a sequence of turns in order.
    ///
    /// The starting board is verified once; intermediate boards are produced
    /// here and are not re-verified. The final board is identical to the one
    /// obtained by calling [`apply_turn`](Self::apply_turn) for each input.
    pub fn apply_turns(
        &self,
        state: &BoardState,
        inputs: &[TurnInput],
    ) -> Result<BoardState, TransitionError> {
        self.verify_commitment(state)?;
        let mut current = state.clone();
        for input in inputs {
            current = self.advance(&current, *input)?.state;
        }
        Ok(current)
    }

    /// Applies one turn and records the full witness for it.
    pub fn witness(
        &self,
        state: &BoardState,
        claimed_prior: &Commitment,
        input: TurnInput,
    ) -> Result<TurnWitness, TransitionError> {
        let outcome =
            self.apply_turn(state, claimed_prior, input.turn, input.direction, input.seed)?;
        Ok(TurnWitness::new(
            state.clone(),
            *claimed_prior,
            input,
            &outcome,
        ))
    }

    /// Re-evaluates a witness and checks that its recorded outputs match.
    pub fn verify_witness(&self, witness: &TurnWitness) -> Result<(), TransitionError> {
        let replayed = self.witness(&witness.prior, &witness.claimed_prior, witness.input)?;
        if replayed.outputs != witness.outputs || replayed.action != witness.action {
            return Err(TransitionError::WitnessMismatch);
        }
        Ok(())
    }

    /// Checks that `state.commitment` is what its fields commit to.
    pub fn verify_commitment(&self, state: &BoardState) -> Result<(), TransitionError> {
        let actual = expected_commitment(&self.scheme, state);
        if actual != state.commitment {
            return Err(TransitionError::mismatch(state.commitment, actual));
        }
        Ok(())
    }

    /// Checks that `state` is an untampered genesis board.
    pub fn verify_genesis(&self, state: &BoardState) -> Result<(), TransitionError> {
        if !state.is_genesis() {
            return Err(TransitionError::NotGenesis { nonce: state.nonce });
        }
        self.verify_commitment(state)
    }

    /// Replays `inputs` from `genesis` and checks the final commitment.
    pub fn verify_chain(
        &self,
        genesis: &BoardState,
        inputs: &[TurnInput],
        expected_final: &Commitment,
    ) -> Result<BoardState, TransitionError> {
        self.verify_genesis(genesis)?;
        let last = self.apply_turns(genesis, inputs)?;
        if last.commitment != *expected_final {
            return Err(TransitionError::mismatch(*expected_final, last.commitment));
        }
        Ok(last)
    }

    fn verify_claim(&self, state: &BoardState, claimed: &Commitment) -> Result<(), TransitionError> {
        if *claimed != state.commitment {
            return Err(TransitionError::mismatch(*claimed, state.commitment));
        }
        let actual = expected_commitment(&self.scheme, state);
        if actual != *claimed {
            return Err(TransitionError::mismatch(*claimed, actual));
        }
        Ok(())
    }

    fn advance(&self, state: &BoardState, input: TurnInput) -> Result<TurnOutcome, TransitionError> {
        let transition = TurnTransition {
            side: input.turn,
            direction: input.direction,
            seed: input.seed,
            combat: &self.combat,
        };

        let mut next = state.clone();
        let action = drive_transition(&transition, &mut next).map_err(TransitionError::Move)?;

        next.nonce = state
            .nonce
            .checked_add(1)
            .ok_or(TransitionError::NonceExhausted(state.nonce))?;
        next.previous = Some(state.commitment);
        next.commitment = chained_commitment(
            &self.scheme,
            &state.commitment,
            next.nonce,
            next.board_id,
            &next.player,
            &next.enemy,
        );

        Ok(TurnOutcome {
            state: next,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MoveError;
    use crate::commitment::Sha512_256Scheme;
    use crate::state::PieceStats;

    fn engine() -> TurnEngine {
        TurnEngine::default()
    }

    fn genesis(engine: &TurnEngine) -> BoardState {
        engine.create_board(1, 7, (4, 1), (8, 9), 20, 10).unwrap()
    }

    #[test]
    fn turn_links_to_prior_and_bumps_nonce() {
        let engine = engine();
        let start = genesis(&engine);
        assert!(start.is_genesis());
        engine.verify_genesis(&start).unwrap();

        let next = engine
            .apply_turn_state(&start, Side::Player, CardinalDirection::North, 0)
            .unwrap();
        assert_eq!(next.nonce, 2);
        assert_eq!(next.board_id, 7);
        assert_eq!(next.previous, Some(start.commitment));
        assert_ne!(next.commitment, start.commitment);
        engine.verify_commitment(&next).unwrap();
        assert!(matches!(
            engine.verify_genesis(&next),
            Err(TransitionError::NotGenesis { nonce: 2 })
        ));
    }

    #[test]
    fn overlapping_start_is_illegal() {
        let engine = engine();
        let err = engine.create_board(1, 1, (3, 3), (3, 3), 20, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalPosition);
        assert!(matches!(
            err,
            TransitionError::Placement(MoveError::IllegalPosition { .. })
        ));
    }

    #[test]
    fn stale_claim_is_rejected_before_moving() {
        let engine = engine();
        let start = genesis(&engine);
        let next = engine
            .apply_turn_state(&start, Side::Player, CardinalDirection::East, 0)
            .unwrap();

        let err = engine
            .apply_turn(&next, &start.commitment, Side::Enemy, CardinalDirection::West, 0)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::CommitmentMismatch {
                claimed: start.commitment,
                actual: next.commitment,
            }
        );
    }

    #[test]
    fn move_errors_carry_their_phase() {
        let engine = engine();
        let start = engine.create_board(1, 1, (0, 0), (5, 5), 20, 10).unwrap();
        let err = engine
            .apply_turn_state(&start, Side::Player, CardinalDirection::West, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.phase(), Some(TransitionPhase::Apply));
    }

    #[test]
    fn encoded_inputs_are_decoded_or_rejected() {
        let engine = engine();
        let start = genesis(&engine);

        let outcome = engine
            .apply_encoded(&start, &start.commitment, 1, 2, 0)
            .unwrap();
        assert_eq!(outcome.state.enemy.position.encode().value(), 8008);

        let err = engine
            .apply_encoded(&start, &start.commitment, 2, 0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        let err = engine
            .apply_encoded(&start, &start.commitment, 0, 4, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn stats_overrides_are_committed() {
        let engine = engine();
        let plain = genesis(&engine);
        let tough = engine
            .create_board_from(
                &BoardSetup::new(1, 7, (4, 1), (8, 9), 20, 10)
                    .with_enemy_stats(PieceStats::new(1, 3)),
            )
            .unwrap();
        assert_eq!(tough.enemy.stats.defense, 3);
        assert_ne!(plain.commitment, tough.commitment);
    }

    #[test]
    fn witness_replays_and_detects_forged_outputs() {
        let engine = engine();
        let start = engine.create_board(1, 1, (2, 4), (2, 5), 20, 10).unwrap();
        let input = TurnInput::new(Side::Player, CardinalDirection::North, 5);

        let witness = engine.witness(&start, &start.commitment, input).unwrap();
        assert!(witness.action.is_attack());
        engine.verify_witness(&witness).unwrap();

        let mut forged = witness.clone();
        forged.outputs.enemy_hp = 10;
        assert_eq!(
            engine.verify_witness(&forged),
            Err(TransitionError::WitnessMismatch)
        );
    }

    #[test]
    fn scheme_changes_every_commitment() {
        let sha256 = engine();
        let sha512 = TurnEngine::with_scheme(GameConfig::default(), Sha512_256Scheme::new());
        let a = sha256.create_board(1, 1, (4, 1), (8, 9), 20, 10).unwrap();
        let b = sha512.create_board(1, 1, (4, 1), (8, 9), 20, 10).unwrap();
        assert_eq!(a.outputs().words(), b.outputs().words());
        assert_ne!(a.commitment, b.commitment);
        assert!(sha512.verify_commitment(&a).is_err());
    }
}
