//! Error types for the terminal front end

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed")]
    Terminal(#[from] std::io::Error),

    #[error("failed to create log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install logger")]
    Logger(#[from] log::SetLoggerError),

    #[error("event channel closed")]
    ChannelClosed,
}
