//! Application-level errors surfaced by the binary.
//!
//! The simulation itself has no error paths: pool exhaustion and missing
//! objects are silent no-ops. Only startup and terminal I/O can fail.

use crate::config::ConfigError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to initialize logging at {path}: {source}")]
    Logging {
        path: String,
        #[source]
        source: io::Error,
    },
}
