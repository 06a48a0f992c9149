//! Application-wide error types using thiserror.

use occupancy_common::OccupancyError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration, validation or export error from the report crates.
    #[error(transparent)]
    Report(#[from] OccupancyError),

    /// Bad command-line usage.
    #[error("Usage error: {0}")]
    Usage(String),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid fact JSON.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Report serialization error.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for the command-line application.
pub type CliResult<T> = Result<T, CliError>;
