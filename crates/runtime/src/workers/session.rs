//! Session worker that owns the authoritative [`BoardState`] of one game.
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), enforces
//! the session policy, resolves turns through [`TurnEngine`], persists the
//! results and publishes events to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use arena_core::{BoardState, TurnEngine, TurnInput, TurnOutcome, TurnWitness};

use crate::api::{Result, RuntimeError};
use crate::events::{EventBus, SessionEvent, TurnEvent};
use crate::repository::{StateRepository, WitnessLog};
use crate::session::{EndReason, SessionId, SessionPolicy, TurnRecord};

/// Commands that can be sent to a session worker.
pub(crate) enum Command {
    /// Resolve one turn against the current board.
    SubmitTurn {
        input: TurnInput,
        reply: oneshot::Sender<Result<TurnOutcome>>,
    },
    /// Query the current board (read-only).
    QueryState { reply: oneshot::Sender<BoardState> },
    /// Accepted turns so far, oldest first.
    History {
        reply: oneshot::Sender<Vec<TurnRecord>>,
    },
    /// Witnesses of the accepted turns, oldest first.
    Witnesses {
        reply: oneshot::Sender<Vec<TurnWitness>>,
    },
    /// Stop the worker after replying.
    Shutdown { reply: oneshot::Sender<BoardState> },
}

/// Background task that processes the turns of one session.
pub(crate) struct SessionWorker {
    id: SessionId,
    engine: TurnEngine,
    policy: SessionPolicy,
    state: BoardState,
    history: Vec<TurnRecord>,
    witnesses: Vec<TurnWitness>,
    ended: Option<EndReason>,
    repository: Box<dyn StateRepository>,
    witness_log: Option<WitnessLog>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: SessionId,
        engine: TurnEngine,
        policy: SessionPolicy,
        genesis: BoardState,
        repository: Box<dyn StateRepository>,
        witness_log: Option<WitnessLog>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Result<Self> {
        repository.save(&genesis)?;

        info!(
            target: "runtime::session",
            session = %id,
            board_id = genesis.board_id,
            genesis = %genesis.commitment.short(),
            "Session started"
        );
        event_bus.publish(SessionEvent::SessionStarted {
            session: id,
            board_id: genesis.board_id,
            genesis: genesis.commitment,
        });

        Ok(Self {
            id,
            engine,
            policy,
            state: genesis,
            history: Vec::new(),
            witnesses: Vec::new(),
            ended: None,
            repository,
            witness_log,
            command_rx,
            event_bus,
        })
    }

    /// Main worker loop. Exits on shutdown or when every handle is dropped.
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
        }

        if self.ended.is_none() {
            self.finish(EndReason::Shutdown);
        }
        debug!(target: "runtime::session", session = %self.id, "Session worker stopped");
    }

    /// Returns false once the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::SubmitTurn { input, reply } => {
                let result = self.submit_turn(input);
                if reply.send(result).is_err() {
                    debug!("SubmitTurn reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::History { reply } => {
                if reply.send(self.history.clone()).is_err() {
                    debug!("History reply channel closed (caller dropped)");
                }
            }
            Command::Witnesses { reply } => {
                if reply.send(self.witnesses.clone()).is_err() {
                    debug!("Witnesses reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("Shutdown reply channel closed (caller dropped)");
                }
                return false;
            }
        }
        true
    }

    fn submit_turn(&mut self, input: TurnInput) -> Result<TurnOutcome> {
        if let Err(error) = self.check_policy(input) {
            self.reject(input, &error);
            return Err(error);
        }

        let prior = self.state.clone();
        let outcome = match self.engine.apply_turn(
            &prior,
            &prior.commitment,
            input.turn,
            input.direction,
            input.seed,
        ) {
            Ok(outcome) => outcome,
            Err(error) => {
                let error = RuntimeError::from(error);
                self.reject(input, &error);
                return Err(error);
            }
        };

        // Persist before committing so a failed write leaves the session unchanged.
        self.repository.save(&outcome.state)?;
        let witness = TurnWitness::new(prior.clone(), prior.commitment, input, &outcome);
        let appended = match self.witness_log.as_mut() {
            Some(log) => log.append(&witness),
            None => Ok(()),
        };
        if let Err(error) = appended {
            if let Err(cleanup) = self.repository.delete(outcome.state.nonce) {
                warn!(
                    target: "runtime::session",
                    session = %self.id,
                    nonce = outcome.state.nonce,
                    error = %cleanup,
                    "Failed to roll back board snapshot"
                );
            }
            return Err(error.into());
        }

        let record = TurnRecord::new(input, &outcome);
        self.state = outcome.state.clone();
        self.history.push(record);
        self.witnesses.push(witness.clone());

        debug!(
            target: "runtime::session",
            session = %self.id,
            nonce = record.nonce,
            side = %record.side,
            direction = %record.direction,
            attacked = record.attacked,
            damage = record.damage,
            commitment = %record.commitment.short(),
            "Turn applied"
        );
        self.event_bus.publish(TurnEvent::TurnApplied {
            session: self.id,
            record,
            witness: Box::new(witness),
        });

        if let Some(winner) = self.state.winner() {
            self.finish(EndReason::Defeat { winner });
        } else if self.history.len() >= self.policy.max_turns as usize {
            self.finish(EndReason::TurnBudget);
        }

        Ok(outcome)
    }

    fn check_policy(&self, input: TurnInput) -> Result<()> {
        if self.state.is_terminal() {
            return Err(RuntimeError::GameOver {
                winner: self.state.winner(),
            });
        }
        if self.history.len() >= self.policy.max_turns as usize {
            return Err(RuntimeError::TurnBudgetExhausted {
                max_turns: self.policy.max_turns,
            });
        }
        let last = self.history.last().map(|record| record.side);
        match self.policy.expected_turn(last) {
            Some(expected) if expected != input.turn => Err(RuntimeError::OutOfTurn {
                expected,
                got: input.turn,
            }),
            _ => Ok(()),
        }
    }

    fn reject(&self, input: TurnInput, error: &RuntimeError) {
        let (kind, phase) = match error {
            RuntimeError::Transition(transition) => (Some(transition.kind()), transition.phase()),
            _ => (None, None),
        };

        warn!(
            target: "runtime::session",
            session = %self.id,
            side = %input.turn,
            direction = %input.direction,
            error = %error,
            "Turn rejected"
        );
        self.event_bus.publish(TurnEvent::TurnRejected {
            session: self.id,
            side: input.turn,
            direction: input.direction,
            kind,
            phase,
            error: error.to_string(),
        });
    }

    fn finish(&mut self, reason: EndReason) {
        self.ended = Some(reason);
        info!(
            target: "runtime::session",
            session = %self.id,
            reason = %reason,
            nonce = self.state.nonce,
            commitment = %self.state.commitment.short(),
            "Session ended"
        );
        self.event_bus.publish(SessionEvent::SessionEnded {
            session: self.id,
            reason,
            nonce: self.state.nonce,
            final_commitment: self.state.commitment,
        });
    }
}
