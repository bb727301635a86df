use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or installing a logger.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to remove log directory {}: {source}", path.display())]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("default logger already installed")]
    DefaultAlreadySet,
}
