//! Session lifecycle scenarios driven through the registry.

use arena_core::{BoardSetup, CardinalDirection, ErrorKind, Side, TurnEngine, TurnInput};
use arena_runtime::{
    EndReason, Event, FileStateRepository, RuntimeConfig, RuntimeError, ScriptedMoves,
    SessionEvent, SessionPolicy, SessionRegistry, StateRepository, Topic, TurnEvent, TurnOrder,
    WitnessLog,
};

/// Player at (2,4) directly south of the enemy at (2,5).
fn adjacent_setup(enemy_hp: u32) -> BoardSetup {
    BoardSetup::new(1, 7, (2, 4), (2, 5), 20, enemy_hp)
}

fn far_setup() -> BoardSetup {
    BoardSetup::new(1, 7, (4, 1), (8, 9), 20, 10)
}

fn registry_with(policy: SessionPolicy) -> SessionRegistry {
    SessionRegistry::new(RuntimeConfig {
        policy,
        ..RuntimeConfig::default()
    })
}

#[tokio::test]
async fn alternating_order_rejects_a_second_player_turn() {
    let registry = registry_with(SessionPolicy::default());
    let session = registry.create_session(&far_setup()).await.unwrap();

    session
        .submit_turn(Side::Player, CardinalDirection::North, 1)
        .await
        .unwrap();
    let err = session
        .submit_turn(Side::Player, CardinalDirection::North, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::OutOfTurn {
            expected: Side::Enemy,
            got: Side::Player
        }
    ));

    session
        .submit_turn(Side::Enemy, CardinalDirection::South, 3)
        .await
        .unwrap();

    let state = session.query_state().await.unwrap();
    assert_eq!(state.nonce, 3);
    assert_eq!(state.outputs().words(), [3, 4002, 20, 8008, 10]);

    registry.shutdown_all().await.unwrap();
}

#[tokio::test]
async fn free_order_accepts_repeated_sides() {
    let registry = registry_with(SessionPolicy {
        turn_order: TurnOrder::Free,
        ..SessionPolicy::default()
    });
    let session = registry.create_session(&far_setup()).await.unwrap();

    for seed in 0..3 {
        session
            .submit_turn(Side::Player, CardinalDirection::East, seed)
            .await
            .unwrap();
    }

    let history = session.history().await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].position.encode().value(), 7001);
    assert!(history.iter().all(|record| record.side == Side::Player));
}

#[tokio::test]
async fn turn_budget_stops_the_session() {
    let registry = registry_with(SessionPolicy {
        max_turns: 2,
        ..SessionPolicy::default()
    });
    let session = registry.create_session(&far_setup()).await.unwrap();
    let mut lifecycle = session.subscribe(Topic::Session);

    session
        .submit_turn(Side::Player, CardinalDirection::North, 0)
        .await
        .unwrap();
    session
        .submit_turn(Side::Enemy, CardinalDirection::West, 0)
        .await
        .unwrap();
    let err = session
        .submit_turn(Side::Player, CardinalDirection::North, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::TurnBudgetExhausted { max_turns: 2 }));
    assert!(err.is_session_over());

    let Event::Session(SessionEvent::SessionEnded { reason, nonce, .. }) =
        lifecycle.recv().await.unwrap()
    else {
        panic!("expected session end");
    };
    assert_eq!(reason, EndReason::TurnBudget);
    assert_eq!(nonce, 3);
}

#[tokio::test]
async fn defeat_ends_the_game() {
    let registry = registry_with(SessionPolicy::default());
    let session = registry.create_session(&adjacent_setup(1)).await.unwrap();

    // Seed 2 rolls a 1 on the first die.
    let outcome = session
        .submit_turn(Side::Player, CardinalDirection::North, 2)
        .await
        .unwrap();
    assert!(outcome.action.is_attack());
    assert_eq!(outcome.state.enemy.hp, 0);
    assert_eq!(outcome.state.winner(), Some(Side::Player));

    let err = session
        .submit_turn(Side::Enemy, CardinalDirection::South, 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::GameOver {
            winner: Some(Side::Player)
        }
    ));
}

#[tokio::test]
async fn rejected_turns_leave_the_board_and_publish_the_reason() {
    let registry = registry_with(SessionPolicy::default());
    let session = registry
        .create_session(&BoardSetup::new(1, 7, (0, 0), (8, 9), 20, 10))
        .await
        .unwrap();
    let before = session.query_state().await.unwrap();
    let mut turns = session.subscribe(Topic::Turn);

    let err = session
        .submit_turn(Side::Player, CardinalDirection::South, 0)
        .await
        .unwrap_err();
    let RuntimeError::Transition(transition) = err else {
        panic!("expected an engine rejection");
    };
    assert_eq!(transition.kind(), ErrorKind::OutOfBounds);
    assert_eq!(session.query_state().await.unwrap(), before);

    let Event::Turn(TurnEvent::TurnRejected { kind, side, .. }) = turns.recv().await.unwrap()
    else {
        panic!("expected a rejection event");
    };
    assert_eq!(kind, Some(ErrorKind::OutOfBounds));
    assert_eq!(side, Side::Player);

    // The rejected turn does not count toward the alternation.
    session
        .submit_turn(Side::Player, CardinalDirection::North, 0)
        .await
        .unwrap();
}

#[tokio::test]
async fn scripted_moves_replay_the_same_chain_as_the_engine() {
    let registry = registry_with(SessionPolicy::default());
    let setup = adjacent_setup(10);
    let session = registry.create_session(&setup).await.unwrap();

    let inputs = vec![
        TurnInput::new(Side::Player, CardinalDirection::North, 2),
        TurnInput::new(Side::Enemy, CardinalDirection::East, 5),
        TurnInput::new(Side::Player, CardinalDirection::West, 10),
        TurnInput::new(Side::Enemy, CardinalDirection::South, 0),
    ];
    let script = ScriptedMoves::new(inputs.clone());
    let last = session.run_with(&script).await.unwrap();
    assert_eq!(script.remaining().await, 0);

    let engine = TurnEngine::default();
    let genesis = engine.create_board_from(&setup).unwrap();
    let replayed = engine
        .verify_chain(&genesis, &inputs, &last.commitment)
        .unwrap();
    assert_eq!(replayed, last);

    let witnesses = session.witnesses().await.unwrap();
    assert_eq!(witnesses.len(), inputs.len());
    for witness in &witnesses {
        engine.verify_witness(witness).unwrap();
    }
}

#[tokio::test]
async fn run_with_stops_when_the_game_is_over() {
    let registry = registry_with(SessionPolicy::default());
    let session = registry.create_session(&adjacent_setup(1)).await.unwrap();

    let script = ScriptedMoves::new([
        TurnInput::new(Side::Player, CardinalDirection::North, 2),
        TurnInput::new(Side::Enemy, CardinalDirection::South, 0),
        TurnInput::new(Side::Player, CardinalDirection::North, 0),
    ]);
    let last = session.run_with(&script).await.unwrap();

    assert_eq!(last.nonce, 2);
    assert_eq!(session.history().await.unwrap().len(), 1);
    // Nothing is pulled from the script after the defeat.
    assert_eq!(script.remaining().await, 2);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let registry = registry_with(SessionPolicy::default());
    let first = registry.create_session(&far_setup()).await.unwrap();
    let second = registry.create_session(&far_setup()).await.unwrap();
    assert_ne!(first.id(), second.id());

    first
        .submit_turn(Side::Player, CardinalDirection::North, 0)
        .await
        .unwrap();

    assert_eq!(first.query_state().await.unwrap().nonce, 2);
    assert_eq!(second.query_state().await.unwrap().nonce, 1);
    assert_eq!(registry.sessions().await, vec![first.id(), second.id()]);

    registry.shutdown(first.id()).await.unwrap();
    assert!(matches!(
        registry.get(first.id()).await,
        Err(RuntimeError::SessionNotFound(_))
    ));
    assert!(first.query_state().await.is_err());
    assert_eq!(registry.get(second.id()).await.unwrap().id(), second.id());
}

#[tokio::test]
async fn shutdown_publishes_session_end() {
    let registry = registry_with(SessionPolicy::default());
    let mut lifecycle = registry.event_bus().subscribe(Topic::Session);
    let session = registry.create_session(&far_setup()).await.unwrap();

    let Event::Session(SessionEvent::SessionStarted { session: id, genesis, .. }) =
        lifecycle.recv().await.unwrap()
    else {
        panic!("expected session start");
    };
    assert_eq!(id, session.id());

    registry.shutdown_all().await.unwrap();
    let Event::Session(SessionEvent::SessionEnded {
        reason,
        final_commitment,
        ..
    }) = lifecycle.recv().await.unwrap()
    else {
        panic!("expected session end");
    };
    assert_eq!(reason, EndReason::Shutdown);
    assert_eq!(final_commitment, genesis);
}

#[tokio::test]
async fn persistence_writes_snapshots_and_witnesses() {
    let dir = tempfile::tempdir().unwrap();
    let registry = SessionRegistry::new(RuntimeConfig {
        enable_persistence: true,
        save_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    });
    let session = registry.create_session(&far_setup()).await.unwrap();

    session
        .submit_turn(Side::Player, CardinalDirection::North, 0)
        .await
        .unwrap();
    session
        .submit_turn(Side::Enemy, CardinalDirection::South, 0)
        .await
        .unwrap();
    let last = session.query_state().await.unwrap();
    registry.shutdown_all().await.unwrap();

    let session_dir = dir.path().join(session.id().to_string());
    let repo = FileStateRepository::new(&session_dir).unwrap();
    assert_eq!(repo.list_nonces().unwrap(), vec![1, 2, 3]);
    assert_eq!(repo.latest().unwrap(), Some(last));

    let witnesses = WitnessLog::read_all(session_dir.join(WitnessLog::FILE_NAME)).unwrap();
    assert_eq!(witnesses.len(), 2);
    let engine = TurnEngine::default();
    for witness in &witnesses {
        engine.verify_witness(witness).unwrap();
    }
}
