//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::value::Row;

/// `sha256:`-prefixed hex digest of raw content.
pub(crate) fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("sha256:{:x}", hasher.finalize())
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }

    /// Metadata for content that never touched the filesystem, such as rows
    /// posted to the exploration server. `path` is left empty.
    pub fn in_memory(
        name: impl Into<String>,
        contents: &[u8],
        format: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: name.into(),
            path: PathBuf::new(),
            hash: content_hash(contents),
            size_bytes: contents.len() as u64,
            format: format.into(),
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Rows read from a source, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// Loosely-typed row records keyed by header.
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
