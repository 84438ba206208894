//! Registry of running sessions.
//!
//! [`SessionRegistry`] creates sessions from a [`BoardSetup`], wires each one
//! to a repository and a worker task, and keeps the handles so sessions can
//! be looked up or shut down later. Sessions share one engine configuration
//! and one [`EventBus`] but never share state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use arena_core::{BoardSetup, TurnEngine};

use super::errors::{Result, RuntimeError};
use super::handle::SessionHandle;
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::repository::{FileStateRepository, InMemoryStateRepo, StateRepository, WitnessLog};
use crate::session::SessionId;
use crate::workers::SessionWorker;

struct SessionEntry {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

pub struct SessionRegistry {
    config: RuntimeConfig,
    engine: TurnEngine,
    event_bus: EventBus,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new(config: RuntimeConfig) -> Self {
        let engine = TurnEngine::with_scheme(config.game_config.clone(), config.hash);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        Self {
            config,
            engine,
            event_bus,
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Bus shared by every session of this registry.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Creates the genesis board for `setup` and starts a worker for it.
    ///
    /// With persistence enabled, snapshots and the witness log land in
    /// `<persistence dir>/session-<id>`; an existing witness log there is
    /// never overwritten.
    pub async fn create_session(&self, setup: &BoardSetup) -> Result<SessionHandle> {
        let genesis = self.engine.create_board_from(setup)?;
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let (repository, witness_log): (Box<dyn StateRepository>, Option<WitnessLog>) =
            match self.config.persistence_dir() {
                Some(root) => {
                    let dir = root.join(id.to_string());
                    let log = WitnessLog::create(&dir)?;
                    (Box::new(FileStateRepository::new(&dir)?), Some(log))
                }
                None => (Box::new(InMemoryStateRepo::new()), None),
            };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let worker = SessionWorker::new(
            id,
            self.engine.clone(),
            self.config.policy,
            genesis,
            repository,
            witness_log,
            command_rx,
            self.event_bus.clone(),
        )?;
        let worker = tokio::spawn(worker.run());

        let handle = SessionHandle::new(id, command_tx, self.event_bus.clone());
        self.sessions.lock().await.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                worker,
            },
        );

        info!(target: "runtime::registry", session = %id, "Session registered");
        Ok(handle)
    }

    pub async fn get(&self, id: SessionId) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .map(|entry| entry.handle.clone())
            .ok_or(RuntimeError::SessionNotFound(id))
    }

    /// Ids of the registered sessions in ascending order.
    pub async fn sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.lock().await.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Stops one session and waits for its worker to exit.
    pub async fn shutdown(&self, id: SessionId) -> Result<()> {
        let entry = self
            .sessions
            .lock()
            .await
            .remove(&id)
            .ok_or(RuntimeError::SessionNotFound(id))?;
        Self::stop(entry).await
    }

    /// Stops every session. All workers are joined even if one fails; the
    /// first failure is returned.
    pub async fn shutdown_all(&self) -> Result<()> {
        let entries: Vec<_> = self.sessions.lock().await.drain().collect();
        let mut first_error = None;

        for (id, entry) in entries {
            if let Err(error) = Self::stop(entry).await {
                warn!(target: "runtime::registry", session = %id, %error, "Session shutdown failed");
                first_error.get_or_insert(error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    async fn stop(entry: SessionEntry) -> Result<()> {
        // A worker that already exited has nothing left to flush.
        match entry.handle.shutdown().await {
            Ok(_)
            | Err(RuntimeError::CommandChannelClosed)
            | Err(RuntimeError::ReplyChannelClosed(_)) => {}
            Err(error) => return Err(error),
        }
        drop(entry.handle);
        entry.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}
