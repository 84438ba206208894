//! Board creation, movement, and attack scenarios.

use arena_core::{
    BoardState, CardinalDirection, Coordinate, ErrorKind, GameConfig, PieceStats, Side,
    TransitionError, TurnAction, TurnEngine, TurnInput, resolve_damage, roll_damage,
};

fn engine() -> TurnEngine {
    TurnEngine::default()
}

/// Positions 4001 / 8009, hp 20 / 10.
fn standard_board(engine: &TurnEngine) -> BoardState {
    engine.create_board(1, 1, (4, 1), (8, 9), 20, 10).unwrap()
}

fn outputs_after(state: &BoardState, side: Side, direction: CardinalDirection) -> [u64; 5] {
    engine()
        .apply_turn(state, &state.commitment, side, direction, 0)
        .unwrap()
        .state
        .outputs()
        .words()
}

#[test]
fn create_board_accepts_every_tile_on_the_board() {
    let engine = engine();
    for x in 0..=10 {
        for y in 0..=10 {
            let enemy = if (x, y) == (0, 0) { (10, 10) } else { (0, 0) };
            let state = engine.create_board(1, 1, (x, y), enemy, 20, 10).unwrap();
            assert_eq!(state.player.position, Coordinate::new(x, y).unwrap());
        }
    }
}

#[test]
fn create_board_rejects_tiles_off_the_board() {
    let engine = engine();
    for (player, enemy) in [
        ((11, 1), (8, 9)),
        ((4, 11), (8, 9)),
        ((4, 1), (11, 9)),
        ((4, 1), (8, -1)),
    ] {
        let err = engine.create_board(1, 1, player, enemy, 20, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds, "{player:?} {enemy:?}");
    }
}

#[test]
fn player_moves_each_direction() {
    let engine = engine();
    let state = standard_board(&engine);
    assert_eq!(state.outputs().words(), [1, 4001, 20, 8009, 10]);

    let cases = [
        (CardinalDirection::North, 4002),
        (CardinalDirection::East, 5001),
        (CardinalDirection::South, 4000),
        (CardinalDirection::West, 3001),
    ];
    for (direction, player_position) in cases {
        assert_eq!(
            outputs_after(&state, Side::Player, direction),
            [2, player_position, 20, 8009, 10],
            "{direction}"
        );
    }
}

#[test]
fn enemy_turn_moves_only_the_enemy() {
    let engine = engine();
    let state = standard_board(&engine);
    assert_eq!(
        outputs_after(&state, Side::Enemy, CardinalDirection::North),
        [2, 4001, 20, 8010, 10]
    );
}

#[test]
fn moving_onto_the_enemy_attacks_instead() {
    let engine = engine();
    let state = engine.create_board(1, 1, (2, 4), (2, 5), 20, 10).unwrap();

    // The first die of seed 2 is a one.
    let outcome = engine
        .apply_turn(&state, &state.commitment, Side::Player, CardinalDirection::North, 2)
        .unwrap();

    assert_eq!(outcome.state.outputs().words(), [2, 2004, 20, 2005, 9]);
    match outcome.action {
        TurnAction::Attacked { target, roll } => {
            assert_eq!(target, Side::Enemy);
            assert_eq!(roll.raw, 1);
            assert_eq!(roll.hp_after, 9);
        }
        other => panic!("expected an attack, got {other:?}"),
    }
    assert_eq!(outcome.action.damage(), 1);
}

#[test]
fn attack_damage_matches_resolve_damage_for_any_seed() {
    let engine = engine();
    let state = engine.create_board(1, 1, (2, 4), (2, 5), 20, 10).unwrap();
    for seed in 0..64 {
        let next = engine
            .apply_turn_state(&state, Side::Player, CardinalDirection::North, seed)
            .unwrap();
        assert_eq!(next.player.position, state.player.position);
        assert_eq!(next.enemy.position, state.enemy.position);
        assert_eq!(next.enemy.hp, resolve_damage(seed, 1, 10, 0));
        assert!(next.enemy.hp < 10);
    }
}

#[test]
fn enemy_attacks_use_enemy_attack_and_player_defense() {
    let engine = engine();
    let setup = arena_core::BoardSetup::new(1, 1, (2, 4), (2, 5), 20, 10)
        .with_player_stats(PieceStats::new(1, 2))
        .with_enemy_stats(PieceStats::new(3, 0));
    let state = engine.create_board_from(&setup).unwrap();

    // Seed 4 rolls 1, 6, 6: maximum six plus one bonus.
    let next = engine
        .apply_turn_state(&state, Side::Enemy, CardinalDirection::South, 4)
        .unwrap();
    let roll = roll_damage(4, 3, 20, 2);
    assert_eq!((roll.max_roll, roll.bonus, roll.raw, roll.net), (6, 1, 7, 5));
    assert_eq!(next.player.hp, 15);
    assert_eq!(next.enemy.hp, 10);
}

#[test]
fn full_defense_blocks_every_roll() {
    for seed in 0..512 {
        assert_eq!(resolve_damage(seed, 1, 10, 11), 10);
    }
}

#[test]
fn attacks_keep_going_after_defeat() {
    let engine = engine();
    let state = engine.create_board(1, 1, (2, 4), (2, 5), 20, 1).unwrap();
    let defeated = engine
        .apply_turn_state(&state, Side::Player, CardinalDirection::North, 0)
        .unwrap();
    assert_eq!(defeated.enemy.hp, 0);
    assert!(defeated.is_terminal());
    assert_eq!(defeated.winner(), Some(Side::Player));

    // Termination is the caller's policy; hp stays clamped at zero.
    let again = engine
        .apply_turn_state(&defeated, Side::Player, CardinalDirection::North, 1)
        .unwrap();
    assert_eq!(again.enemy.hp, 0);
    assert_eq!(again.nonce, defeated.nonce + 1);
}

#[test]
fn sequential_and_batched_chains_converge() {
    let engine = engine();
    let genesis = standard_board(&engine);

    let first = engine
        .apply_turn(&genesis, &genesis.commitment, Side::Player, CardinalDirection::North, 11)
        .unwrap()
        .state;
    let second = engine
        .apply_turn(&first, &first.commitment, Side::Enemy, CardinalDirection::West, 12)
        .unwrap()
        .state;

    let inputs = [
        TurnInput::new(Side::Player, CardinalDirection::North, 11),
        TurnInput::new(Side::Enemy, CardinalDirection::West, 12),
    ];
    let batched = engine.apply_turns(&genesis, &inputs).unwrap();

    assert_eq!(batched, second);
    assert_eq!(
        engine
            .verify_chain(&genesis, &inputs, &second.commitment)
            .unwrap()
            .commitment,
        second.commitment
    );
}

#[test]
fn altered_position_with_reused_commitment_is_rejected() {
    let engine = engine();
    let genesis = standard_board(&engine);
    let next = engine
        .apply_turn_state(&genesis, Side::Player, CardinalDirection::North, 0)
        .unwrap();

    let mut forged = next.clone();
    forged.player.position = Coordinate::new(4, 7).unwrap();

    let err = engine
        .apply_turn(&forged, &next.commitment, Side::Player, CardinalDirection::North, 0)
        .unwrap_err();
    assert!(matches!(err, TransitionError::CommitmentMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::CommitmentMismatch);

    // Same for a forged genesis.
    let mut forged = genesis.clone();
    forged.enemy.hp = 1;
    let err = engine
        .apply_turn(&forged, &genesis.commitment, Side::Player, CardinalDirection::East, 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CommitmentMismatch);
}

#[test]
fn divergent_history_changes_every_later_commitment() {
    let engine = engine();
    let genesis = standard_board(&engine);

    let a = engine
        .apply_turns(
            &genesis,
            &[
                TurnInput::new(Side::Player, CardinalDirection::East, 1),
                TurnInput::new(Side::Enemy, CardinalDirection::South, 1),
            ],
        )
        .unwrap();
    let b = engine
        .apply_turns(
            &genesis,
            &[
                TurnInput::new(Side::Player, CardinalDirection::West, 1),
                TurnInput::new(Side::Player, CardinalDirection::East, 1),
                TurnInput::new(Side::Player, CardinalDirection::East, 1),
                TurnInput::new(Side::Enemy, CardinalDirection::South, 1),
            ],
        )
        .unwrap();

    // Same positions, same hp, different history.
    assert_eq!(a.player, b.player);
    assert_eq!(a.enemy, b.enemy);
    assert_ne!(a.commitment, b.commitment);
}

#[test]
fn failed_turn_leaves_input_untouched() {
    let engine = engine();
    let state = engine.create_board(1, 1, (10, 10), (0, 0), 20, 10).unwrap();
    let before = state.clone();

    let err = engine
        .apply_turn_state(&state, Side::Player, CardinalDirection::North, 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(state, before);
}

#[test]
fn dice_sides_come_from_config() {
    let engine = TurnEngine::new(GameConfig::with_dice_sides(1));
    let state = engine.create_board(1, 1, (2, 4), (2, 5), 20, 10).unwrap();
    for seed in 0..16 {
        let next = engine
            .apply_turn_state(&state, Side::Player, CardinalDirection::North, seed)
            .unwrap();
        assert_eq!(next.enemy.hp, 9);
    }
}
