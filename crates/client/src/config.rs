//! Client configuration loaded from environment variables.
use std::env;
use std::path::PathBuf;

use arena_core::BoardSetup;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Names the log directory of this run.
    pub session_name: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// JSON move script; without one the board is created and reported as is.
    pub script_path: Option<PathBuf>,
    pub board: BoardSetup,
    /// Record genesis and final commitments on the mock ledger.
    pub enable_ledger: bool,
    /// Include every turn witness in the report.
    pub print_witnesses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_name: None,
            log_dir: None,
            script_path: None,
            board: BoardSetup::new(1, 1, (4, 1), (8, 9), 20, 10),
            enable_ledger: false,
            print_witnesses: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SESSION_NAME` - Log directory name (default: `run_<unix time>`)
    /// - `ARENA_LOG_DIR` - Log root (default: platform cache directory)
    /// - `ARENA_SCRIPT` - Path to a JSON move script
    /// - `ARENA_NONCE` / `ARENA_BOARD_ID` - Genesis nonce and board id (default: 1 / 1)
    /// - `ARENA_PLAYER_POS` / `ARENA_ENEMY_POS` - `x,y` (default: `4,1` / `8,9`)
    /// - `ARENA_PLAYER_HP` / `ARENA_ENEMY_HP` - Starting hit points (default: 20 / 10)
    /// - `ARENA_ENABLE_LEDGER` - Anchor the session on the mock ledger (default: false)
    /// - `ARENA_PRINT_WITNESSES` - Include witnesses in the report (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.session_name = env::var("ARENA_SESSION_NAME").ok();
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);
        config.script_path = env::var("ARENA_SCRIPT").ok().map(PathBuf::from);

        if let Some(nonce) = read_env::<u64>("ARENA_NONCE") {
            config.board.nonce = nonce;
        }
        if let Some(board_id) = read_env::<u64>("ARENA_BOARD_ID") {
            config.board.board_id = board_id;
        }
        if let Some(position) = env::var("ARENA_PLAYER_POS").ok().and_then(|v| parse_pair(&v)) {
            config.board.player_position = position;
        }
        if let Some(position) = env::var("ARENA_ENEMY_POS").ok().and_then(|v| parse_pair(&v)) {
            config.board.enemy_position = position;
        }
        if let Some(hp) = read_env::<u32>("ARENA_PLAYER_HP") {
            config.board.player_hp = hp;
        }
        if let Some(hp) = read_env::<u32>("ARENA_ENEMY_HP") {
            config.board.enemy_hp = hp;
        }

        config.enable_ledger = read_flag("ARENA_ENABLE_LEDGER");
        config.print_witnesses = read_flag("ARENA_PRINT_WITNESSES");

        config
    }
}

/// Parses `"x,y"`; coordinates are range-checked later by the engine.
fn parse_pair(value: &str) -> Option<(i64, i64)> {
    let (x, y) = value.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// A bare variable counts as "true".
fn read_flag(key: &str) -> bool {
    read_env::<bool>(key).unwrap_or_else(|| env::var(key).is_ok())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
