//! Error types for the chartsense library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chartsense operations.
///
/// Analysis itself never fails: degenerate input produces fallback values.
/// Errors only come from ingesting files and from looking up columns by key.
#[derive(Debug, Error)]
pub enum ChartsenseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no rows to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column key that is not part of the analyzed dataset.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for chartsense operations.
pub type Result<T> = std::result::Result<T, ChartsenseError>;
