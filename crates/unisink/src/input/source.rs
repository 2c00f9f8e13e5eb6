//! Input file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Origin;

/// Metadata about one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Format the file was read as.
    pub origin: Origin,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Raw lines or rows read.
    pub entry_count: usize,
    /// Records produced from those entries.
    pub record_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(path: PathBuf, origin: Origin, hash: String, size_bytes: u64, entry_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            origin,
            hash,
            size_bytes,
            entry_count,
            record_count: 0,
            read_at: Utc::now(),
        }
    }

    /// Entries that produced no record.
    pub fn skipped(&self) -> usize {
        self.entry_count.saturating_sub(self.record_count)
    }
}
