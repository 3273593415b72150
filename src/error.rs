//! Error types and exit codes for refindex.

use std::process::ExitCode;
use thiserror::Error;

/// Fatal errors that abort a run.
///
/// Per-file problems never surface here; indexers log and skip them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("The output directory {path} does not exist")]
    OutputDirMissing { path: String },

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: String, message: String },

    #[error("Failed to load symbol source {path}: {message}")]
    SymbolSource { path: String, message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit codes:
    /// - 1: IO error
    /// - 2: Output directory missing
    /// - 3: Configuration error
    /// - 4: Symbol source unreadable
    /// - 5: Serialization failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::from(1),
            Self::OutputDirMissing { .. } => ExitCode::from(2),
            Self::Config { .. } => ExitCode::from(3),
            Self::SymbolSource { .. } => ExitCode::from(4),
            Self::Serialization { .. } => ExitCode::from(5),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
