//! Line and CSV row readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::SourceMetadata;
use crate::error::{Result, UnisinkError};
use crate::model::Origin;

/// Read a text file as trimmed lines.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = read_bytes(path)?;
    lines_from_bytes(path, &contents)
}

/// One CSV record and the file line it starts on.
///
/// Blank lines are dropped by the CSV reader and a quoted cell may span
/// several lines, so the row index is not the line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line of the record's first cell.
    pub line: u64,
    pub cells: Vec<String>,
}

/// Read a headerless CSV file as rows of cells.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let contents = read_bytes(path.as_ref())?;
    rows_from_bytes(&contents)
}

/// Read a text file as trimmed lines, with its metadata.
pub fn load_lines(path: impl AsRef<Path>, origin: Origin) -> Result<(Vec<String>, SourceMetadata)> {
    let path = path.as_ref();
    let contents = read_bytes(path)?;
    let lines = lines_from_bytes(path, &contents)?;
    let metadata = describe(path, origin, &contents, lines.len());
    Ok((lines, metadata))
}

/// Read a headerless CSV file as rows, with its metadata.
pub fn load_rows(path: impl AsRef<Path>, origin: Origin) -> Result<(Vec<Row>, SourceMetadata)> {
    let path = path.as_ref();
    let contents = read_bytes(path)?;
    let rows = rows_from_bytes(&contents)?;
    let metadata = describe(path, origin, &contents, rows.len());
    Ok((rows, metadata))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| UnisinkError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(|e| UnisinkError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(contents)
}

fn lines_from_bytes(path: &Path, bytes: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(bytes).map_err(|e| UnisinkError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    Ok(text.lines().map(|l| l.trim().to_string()).collect())
}

fn rows_from_bytes(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut cursor = LineCursor::new();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let from = record.position().map_or(cursor.offset, |p| p.byte() as usize);
        rows.push(Row {
            line: cursor.advance_to_record(bytes, from),
            cells: record.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(rows)
}

/// Running line count through a CSV buffer.
///
/// A record's reported position is where the previous record ended, before
/// any blank lines the reader skipped.
struct LineCursor {
    offset: usize,
    line: u64,
}

impl LineCursor {
    fn new() -> Self {
        Self { offset: 0, line: 1 }
    }

    /// Line of the first non-blank byte at or after `from`.
    fn advance_to_record(&mut self, bytes: &[u8], from: usize) -> u64 {
        let from = from.min(bytes.len());
        let blank = bytes[from..]
            .iter()
            .take_while(|b| matches!(b, b'\r' | b'\n'))
            .count();
        let start = from + blank;

        if start > self.offset {
            self.line += bytes[self.offset..start].iter().filter(|&&b| b == b'\n').count() as u64;
            self.offset = start;
        }
        self.line
    }
}

fn describe(path: &Path, origin: Origin, contents: &[u8], entry_count: usize) -> SourceMetadata {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let hash = format!("sha256:{:x}", hasher.finalize());

    SourceMetadata::new(
        path.to_path_buf(),
        origin,
        hash,
        contents.len() as u64,
        entry_count,
    )
}
