//! Runtime configuration and environment loading.
use std::env;
use std::path::PathBuf;

use arena_core::{GameConfig, HashAlgorithm};

use crate::session::{SessionPolicy, TurnOrder};

/// Runtime configuration shared across the registry and session workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub hash: HashAlgorithm,
    pub policy: SessionPolicy,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Write board snapshots and witness logs under `save_dir`.
    pub enable_persistence: bool,
    pub save_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            hash: HashAlgorithm::default(),
            policy: SessionPolicy::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            enable_persistence: false,
            save_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_MAX_TURNS` - Turns accepted per session (default: 50)
    /// - `ARENA_TURN_ORDER` - `alternating` or `free` (default: alternating)
    /// - `ARENA_FIRST_TURN` - `player` or `enemy` (default: player)
    /// - `ARENA_HASH` - `sha256` or `sha512_256` (default: sha256)
    /// - `ARENA_DICE_SIDES` - Faces per damage die (default: 6)
    /// - `ARENA_ENABLE_PERSISTENCE` - Persist snapshots and witnesses (default: false)
    /// - `ARENA_SAVE_DIR` - Directory for save data (default: platform-specific)
    /// - `ARENA_EVENT_BUFFER` - Event channel capacity per topic (default: 100)
    /// - `ARENA_COMMAND_BUFFER` - Session command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_turns) = read_env::<u32>("ARENA_MAX_TURNS") {
            config.policy.max_turns = max_turns;
        }
        if let Some(order) = read_env::<TurnOrder>("ARENA_TURN_ORDER") {
            config.policy.turn_order = order;
        }
        if let Some(first) = read_env("ARENA_FIRST_TURN") {
            config.policy.first_turn = first;
        }
        if let Some(hash) = read_env::<HashAlgorithm>("ARENA_HASH") {
            config.hash = hash;
        }
        if let Some(sides) = read_env::<u32>("ARENA_DICE_SIDES") {
            config.game_config.dice_sides = sides.max(1);
        }

        if let Some(enable) = read_env::<bool>("ARENA_ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if env::var("ARENA_ENABLE_PERSISTENCE").is_ok() {
            // A bare variable counts as "true".
            config.enable_persistence = true;
        }
        config.save_dir = env::var("ARENA_SAVE_DIR").ok().map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("ARENA_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    /// Root directory for persisted sessions, if persistence is enabled.
    ///
    /// Falls back to the platform data directory (e.g. `~/.local/share/arena`
    /// on Linux) when no explicit directory is configured.
    pub fn persistence_dir(&self) -> Option<PathBuf> {
        if !self.enable_persistence {
            return None;
        }
        Some(self.save_dir.clone().unwrap_or_else(default_data_dir))
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_dir_requires_opt_in() {
        let mut config = RuntimeConfig {
            save_dir: Some(PathBuf::from("/tmp/arena-test")),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.persistence_dir(), None);

        config.enable_persistence = true;
        assert_eq!(
            config.persistence_dir(),
            Some(PathBuf::from("/tmp/arena-test"))
        );
    }
}
