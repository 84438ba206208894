//! Append-only witness log.
//!
//! One JSON document per line, one line per accepted turn. External
//! verifiers read it without depending on this crate.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use arena_core::TurnWitness;

use crate::repository::{RepositoryError, Result};

pub struct WitnessLog {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: u64,
}

impl WitnessLog {
    pub const FILE_NAME: &'static str = "witnesses.jsonl";

    /// Creates a new log in `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(Self::FILE_NAME);
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new()
            .create_new(true)
            .append(true)
            .open(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    /// Appends to an existing file such as a device node.
    #[cfg(test)]
    pub(crate) fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of witnesses appended through this handle.
    pub fn len(&self) -> u64 {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Appends one witness and flushes it to disk.
    pub fn append(&mut self, witness: &TurnWitness) -> Result<()> {
        serde_json::to_writer(&mut self.writer, witness)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.entries += 1;
        Ok(())
    }

    /// Reads every witness stored at `path`, in append order.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<TurnWitness>> {
        let reader = BufReader::new(File::open(path)?);
        let mut witnesses = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let witness = serde_json::from_str(&line).map_err(|e| {
                RepositoryError::CorruptedData(format!("line {}: {}", index + 1, e))
            })?;
            witnesses.push(witness);
        }

        Ok(witnesses)
    }
}
