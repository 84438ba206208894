//! Plays one scripted session end to end.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use arena_core::{BoardOutputs, Commitment, Side, TurnInput, TurnWitness};
use arena_ledger::{MockLedger, SessionSubmitter};
use arena_runtime::{RuntimeConfig, ScriptedMoves, SessionId, SessionRegistry};

use crate::config::ClientConfig;
use crate::script::load_script;

/// Summary printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub session: SessionId,
    pub board_id: u64,
    pub genesis: Commitment,
    /// Turns accepted before the script ended or the session stopped.
    pub turns: usize,
    /// Script entries never submitted.
    pub skipped: usize,
    pub winner: Option<Side>,
    pub outputs: BoardOutputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<LedgerReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub witnesses: Vec<TurnWitness>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub session: String,
    pub transaction: String,
    pub checkpoint: Commitment,
}

pub async fn run(config: &ClientConfig, runtime: RuntimeConfig) -> Result<SimulationReport> {
    let inputs = match &config.script_path {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let registry = SessionRegistry::new(runtime);
    let session = registry
        .create_session(&config.board)
        .await
        .context("failed to create board")?;
    let genesis = session.query_state().await?;

    let submitter = config
        .enable_ledger
        .then(|| SessionSubmitter::new(MockLedger::new()));
    if let Some(submitter) = &submitter {
        submitter.start(genesis.board_id, genesis.commitment).await?;
    }

    let script = ScriptedMoves::new(inputs.iter().copied());
    let last = session.run_with(&script).await?;
    let skipped = script.remaining().await;
    let history = session.history().await?;
    let witnesses = session.witnesses().await?;
    registry.shutdown_all().await?;

    let played: Vec<TurnInput> = history
        .iter()
        .map(|record| TurnInput::new(record.side, record.direction, record.seed))
        .collect();
    registry
        .engine()
        .verify_chain(&genesis, &played, &last.commitment)
        .context("session history does not replay to its final commitment")?;

    let ledger = match &submitter {
        Some(submitter) => {
            let transaction = submitter.complete(last.commitment).await?;
            let session = submitter
                .session_id()
                .map(ToString::to_string)
                .unwrap_or_default();
            Some(LedgerReport {
                session,
                transaction: transaction.to_string(),
                checkpoint: last.commitment,
            })
        }
        None => None,
    };

    info!(
        session = %session.id(),
        turns = history.len(),
        skipped,
        commitment = %last.commitment.short(),
        "Simulation finished"
    );

    Ok(SimulationReport {
        session: session.id(),
        board_id: last.board_id,
        genesis: genesis.commitment,
        turns: history.len(),
        skipped,
        winner: last.winner(),
        outputs: last.outputs(),
        ledger,
        witnesses: if config.print_witnesses {
            witnesses
        } else {
            Vec::new()
        },
    })
}
