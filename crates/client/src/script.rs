//! JSON move scripts.
//!
//! A script is an array of turns:
//!
//! ```json
//! [{"turn": 0, "move": "north", "seed": 7}, {"turn": "enemy", "move": 2, "seed": 3}]
//! ```
//!
//! `turn` and `move` accept either their numeric codes or their names.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use arena_core::{CardinalDirection, InputError, Side, TurnInput};

/// A turn or move field, by code or by name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MoveCode {
    Code(u8),
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScriptEntry {
    pub turn: MoveCode,
    #[serde(rename = "move")]
    pub direction: MoveCode,
    pub seed: u64,
}

impl ScriptEntry {
    pub fn to_input(&self) -> Result<TurnInput> {
        let turn = match &self.turn {
            MoveCode::Code(code) => Side::try_from(*code)?,
            MoveCode::Name(name) => name
                .parse::<Side>()
                .map_err(|_| anyhow!("unknown side {name:?}"))?,
        };
        let direction = match &self.direction {
            MoveCode::Code(code) => {
                CardinalDirection::try_from(*code).map_err(InputError::InvalidDirection)?
            }
            MoveCode::Name(name) => name
                .parse::<CardinalDirection>()
                .map_err(|_| anyhow!("unknown move {name:?}"))?,
        };
        Ok(TurnInput::new(turn, direction, self.seed))
    }
}

pub fn parse_script(json: &str) -> Result<Vec<TurnInput>> {
    let entries: Vec<ScriptEntry> = serde_json::from_str(json).context("malformed move script")?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .to_input()
                .with_context(|| format!("script entry {index}"))
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<TurnInput>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read move script {}", path.display()))?;
    parse_script(&json)
}
