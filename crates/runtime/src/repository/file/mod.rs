//! File-based repository implementations.

mod state;
mod witness_log;

pub use state::FileStateRepository;
pub use witness_log::WitnessLog;
