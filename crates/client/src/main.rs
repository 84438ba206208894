//! Arena simulator binary.
//!
//! Composition root: loads `.env`, builds the runtime and client
//! configuration, installs logging, plays the configured script and prints
//! the report as JSON on stdout.
//!
//! # Examples
//!
//! ```bash
//! ARENA_SCRIPT=moves.json ARENA_ENABLE_LEDGER=1 cargo run -p arena-client
//! ```

use anyhow::Result;

use arena_client::{ClientConfig, logging, run};
use arena_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let runtime_config = RuntimeConfig::from_env();
    let client_config = ClientConfig::from_env();

    let log_file = logging::setup_logging(
        client_config.log_dir.as_deref(),
        client_config.session_name.as_deref(),
    )?;

    tracing::info!("Starting arena simulator");
    tracing::info!("Hash: {}", runtime_config.hash);
    tracing::info!("Turn order: {}", runtime_config.policy.turn_order);
    tracing::info!("Persistence: {}", runtime_config.enable_persistence);
    tracing::debug!("Log file: {}", log_file.display());

    let report = run(&client_config, runtime_config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!("Simulator shutdown complete");
    Ok(())
}
