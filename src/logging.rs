//! Log setup. The terminal belongs to the TUI, so logs go to a file.

use crate::error::AppError;
use directories::ProjectDirs;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "laneshift.log";

/// Platform data directory for the log file, falling back to the temp dir.
pub fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "laneshift")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}

/// Install the global subscriber writing to `dir/laneshift.log`.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Returns the log path.
pub fn init_tracing(dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(LOG_FILE_NAME);
    let logging_error = |source: io::Error| AppError::Logging {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(logging_error)?;
    let file = File::create(&path).map_err(logging_error)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| logging_error(io::Error::other(e)))?;

    Ok(path)
}
