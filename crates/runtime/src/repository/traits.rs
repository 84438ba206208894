//! Repository contracts for saving and loading board snapshots.

use arena_core::BoardState;

use super::Result;

/// Repository for board snapshots of a single session, indexed by nonce.
///
/// Snapshots let a session be inspected or resumed; the commitment chain
/// itself never depends on them.
pub trait StateRepository: Send + Sync {
    /// Save a board indexed by its nonce
    fn save(&self, state: &BoardState) -> Result<()>;

    /// Load a board by nonce
    fn load(&self, nonce: u64) -> Result<Option<BoardState>>;

    /// Check if a board exists
    fn exists(&self, nonce: u64) -> bool;

    /// Delete a board
    fn delete(&self, nonce: u64) -> Result<()>;

    /// List all available nonces in ascending order
    fn list_nonces(&self) -> Result<Vec<u64>>;

    /// Load the board with the highest nonce
    fn latest(&self) -> Result<Option<BoardState>> {
        match self.list_nonces()?.last() {
            Some(&nonce) => self.load(nonce),
            None => Ok(None),
        }
    }
}
