//! Error types for the gate binary.
//!
//! Validation failures are wrapped as [`GateError::Rejected`]; the remaining
//! variants cover reading the request and writing the two outputs.

use crate::rejection::Rejection;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that end a gate run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum GateError {
    /// The request failed validation.
    #[error("command rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Standard input could not be read.
    #[error("failed to read request: {source}")]
    ReadInput {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be staged or moved into place.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        /// Destination path that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for gate runs.
pub type Result<T> = std::result::Result<T, GateError>;
