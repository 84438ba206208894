//! Headless arena simulator.
//!
//! Loads a board and a move script from the environment, plays the script
//! through [`arena_runtime`], optionally anchors the session on a ledger, and
//! reports the final public outputs.

pub mod config;
pub mod logging;
pub mod script;
pub mod simulator;

pub use config::ClientConfig;
pub use script::{MoveCode, ScriptEntry, load_script, parse_script};
pub use simulator::{LedgerReport, SimulationReport, run};
