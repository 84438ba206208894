//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! submitting turns, reading the board back, or streaming events.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use arena_core::{BoardState, CardinalDirection, Side, TurnInput, TurnOutcome, TurnWitness};

use super::errors::{Result, RuntimeError};
use super::providers::MoveProvider;
use crate::events::{Event, EventBus, Topic};
use crate::session::{SessionId, TurnRecord};
use crate::workers::Command;

/// Client-facing handle to one running session.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(id: SessionId, command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Submit one turn. Turns are resolved in the order they reach the worker.
    pub async fn submit_turn(
        &self,
        turn: Side,
        direction: CardinalDirection,
        seed: u64,
    ) -> Result<TurnOutcome> {
        self.submit(TurnInput::new(turn, direction, seed)).await
    }

    pub async fn submit(&self, input: TurnInput) -> Result<TurnOutcome> {
        self.request(|reply| Command::SubmitTurn { input, reply }).await?
    }

    /// Current board of the session.
    pub async fn query_state(&self) -> Result<BoardState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Accepted turns, oldest first.
    pub async fn history(&self) -> Result<Vec<TurnRecord>> {
        self.request(|reply| Command::History { reply }).await
    }

    /// Witnesses of accepted turns, oldest first.
    pub async fn witnesses(&self) -> Result<Vec<TurnWitness>> {
        self.request(|reply| Command::Witnesses { reply }).await
    }

    /// Stop the session worker and return its last board.
    pub async fn shutdown(&self) -> Result<BoardState> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Drive the session with moves from `provider`.
    ///
    /// Stops when the provider runs out of moves or the session stops
    /// accepting turns, and returns the last board. Moves are not pulled
    /// from the provider once the game is over. Any other refusal is
    /// returned as an error.
    pub async fn run_with(&self, provider: &dyn MoveProvider) -> Result<BoardState> {
        loop {
            let state = self.query_state().await?;
            if state.is_terminal() {
                return Ok(state);
            }
            let Some(input) = provider.next_turn(&state).await? else {
                return Ok(state);
            };

            match self.submit(input).await {
                Ok(_) => {}
                Err(error) if error.is_session_over() => {
                    debug!(session = %self.id, %error, "Session no longer accepts turns");
                    return self.query_state().await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// The bus is shared by every session of a registry; filter on the
    /// session id carried by each event.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use arena_runtime::Topic;
    ///
    /// let mut turns = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turns.recv().await {
    ///     // Handle accepted and rejected turns
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
