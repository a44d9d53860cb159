use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, VoteError};

const LOG_DIR: &str = "pair-vote";
const LOG_FILE: &str = "pair-vote.log";

/// Default log file under the platform's local data directory.
pub fn default_log_path() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().join(LOG_DIR).join(LOG_FILE))
        .ok_or_else(|| VoteError::Logging("Could not determine data directory".to_string()))
}

/// Installs a file-only subscriber; the terminal is owned by the UI.
///
/// `RUST_LOG` takes precedence over `level`. Keep the returned guard alive for the
/// whole run or buffered lines are lost.
pub fn init(level: &str, path: &Path) -> Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| VoteError::Logging(format!("Not a file path: {}", path.display())))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| VoteError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), level, "logging initialized");
    Ok(guard)
}
