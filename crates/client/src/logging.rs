//! Logging setup for the simulator binary.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a file logger under `<log root>/<session name>/arena.log`.
///
/// Stdout is left alone so the JSON report can be piped. Returns the log
/// file path.
pub fn setup_logging(log_dir: Option<&Path>, session_name: Option<&str>) -> Result<PathBuf> {
    let log_dir = log_dir.map_or_else(default_log_directory, Path::to_path_buf);

    let session_name = session_name.map_or_else(
        || {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("run_{timestamp}")
        },
        str::to_owned,
    );

    let session_log_dir = log_dir.join(&session_name);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "arena.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    // Keep the writer alive for the rest of the process.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_name);
    Ok(session_log_dir.join("arena.log"))
}

/// Platform cache directory, e.g. `~/.cache/arena/logs` on Linux.
fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
