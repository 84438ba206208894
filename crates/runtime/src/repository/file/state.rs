//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use arena_core::BoardState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// Stores boards as individual bincode files indexed by nonce.
///
/// # File Format
///
/// Boards are stored as `board_{nonce}.bin`. Writes go to a temporary file
/// first and are renamed into place, so a crash never leaves a torn
/// snapshot behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn state_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("board_{}.bin", nonce))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, state: &BoardState) -> Result<()> {
        let path = self.state_path(state.nonce);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved board[{}] to {}", state.nonce, path.display());

        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<BoardState>> {
        let path = self.state_path(nonce);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: BoardState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if state.nonce != nonce {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds nonce {}",
                path.display(),
                state.nonce
            )));
        }

        tracing::debug!("Loaded board[{}] from {}", nonce, path.display());

        Ok(Some(state))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.state_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.state_path(nonce);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted board[{}]", nonce);
        }

        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(nonce_str) = filename
                    .strip_prefix("board_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(nonce) = nonce_str.parse::<u64>()
            {
                nonces.push(nonce);
            }
        }

        nonces.sort_unstable();
        Ok(nonces)
    }
}
