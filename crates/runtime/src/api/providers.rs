//! Asynchronous abstraction for sourcing player and enemy moves.
//!
//! Runtime users plug in [`MoveProvider`] implementations so a session can
//! run with human input, scripted fixtures, or an AI policy. The engine
//! constrains only the legality of a move, never how it was chosen.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use arena_core::{BoardState, TurnInput};

use super::errors::Result;

/// Trait for choosing the next turn based on the current board.
#[async_trait]
pub trait MoveProvider: Send + Sync {
    /// Returns the next turn to submit, or `None` when the provider has
    /// nothing more to play.
    async fn next_turn(&self, state: &BoardState) -> Result<Option<TurnInput>>;
}

/// Replays a fixed list of turns in order.
pub struct ScriptedMoves {
    turns: Mutex<VecDeque<TurnInput>>,
}

impl ScriptedMoves {
    pub fn new(turns: impl IntoIterator<Item = TurnInput>) -> Self {
        Self {
            turns: Mutex::new(turns.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.turns.lock().await.len()
    }
}

#[async_trait]
impl MoveProvider for ScriptedMoves {
    async fn next_turn(&self, _state: &BoardState) -> Result<Option<TurnInput>> {
        Ok(self.turns.lock().await.pop_front())
    }
}
