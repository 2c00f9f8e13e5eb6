//! CSV export of resolved annotations.
//!
//! One row per record, no header: signature, origin, source/sink, category.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, UnisinkError};
use crate::model::Annotation;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "lissa_annotations.csv";

/// Write annotations to a CSV file, creating parent directories as needed.
pub fn write_annotations(path: impl AsRef<Path>, annotations: &[Annotation]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| UnisinkError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let file = File::create(path).map_err(|e| UnisinkError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_annotations_to(file, annotations)
}

/// Write annotations as CSV rows to any writer.
pub fn write_annotations_to<W: Write>(writer: W, annotations: &[Annotation]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for ann in annotations {
        writer.write_record(ann.to_row())?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
