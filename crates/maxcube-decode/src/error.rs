//! Error types for the decoder CLI.

use std::path::PathBuf;

use maxcube_protocol::ProtocolError;
use thiserror::Error;

/// Errors that stop the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration is not valid YAML or has unknown values.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// A record could not be serialized.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// A message could not be decoded.
    #[error("line {line}: {source}")]
    Decode {
        /// 1-based input line number.
        line: usize,
        /// Decoder error.
        source: ProtocolError,
    },
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
