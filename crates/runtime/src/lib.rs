//! Session orchestration for the arena turn engine.
//!
//! This crate wraps [`arena_core::TurnEngine`] with everything a running game
//! needs: one worker task per session that serializes turns, session policy
//! (turn order, turn budget, game over), repositories for board snapshots and
//! witness logs, and a topic-based event bus.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the registry, handles and move providers
//! - [`session`] holds session-level policy and records
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists boards and witnesses
//! - [`config`] loads runtime settings from the environment
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod session;

mod workers;

pub use api::{
    MoveProvider, Result, RuntimeError, ScriptedMoves, SessionHandle, SessionRegistry,
};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, SessionEvent, Topic, TurnEvent};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository, WitnessLog,
};
pub use session::{EndReason, SessionId, SessionPolicy, TurnOrder, TurnRecord};
