//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during a session:
//! - Board snapshots (for inspection and resume)
//! - Turn witnesses (for external verification)

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, WitnessLog};
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
