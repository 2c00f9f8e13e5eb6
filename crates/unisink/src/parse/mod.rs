//! Parsers for the three annotation formats.
//!
//! Each parser turns one raw line (or CSV row) into [`ParsedFields`].
//! `Ok(None)` means the input is not an annotation (a header, a native
//! method) and is skipped; `Err` means the input looked like an annotation
//! but could not be decomposed.

mod catalog;
mod framework_scan;
mod permission_map;

pub use catalog::{parse_catalog_line, CatalogParser};
pub use framework_scan::{parse_framework_scan_line, FrameworkScanParser};
pub use permission_map::{parse_permission_map_row, PermissionMapParser};

use crate::error::Result;
use crate::model::{Annotation, Origin, SourceOrSink};

/// Fields extracted from one raw entry, before canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    /// Fully qualified method name.
    pub meth_name: String,
    /// Parameter types in declaration order, qualification allowed.
    pub meth_params: Vec<String>,
    pub ret_type: String,
    pub source_or_sink: SourceOrSink,
    pub category: String,
}

impl ParsedFields {
    /// Build the canonical record for these fields.
    pub fn into_annotation(self, origin: Origin) -> Annotation {
        Annotation::new(
            String::new(),
            &self.meth_name,
            self.meth_params,
            self.ret_type,
            self.category,
            origin,
            self.source_or_sink,
        )
    }
}

/// A parser for one input format.
pub trait AnnotationFormat {
    /// One raw entry: a line for text formats, a row of cells for tabular ones.
    type Raw: ?Sized;

    /// Origin tag given to every record this format produces.
    const ORIGIN: Origin;

    /// Parse one raw entry.
    fn parse(&self, raw: &Self::Raw) -> Result<Option<ParsedFields>>;
}

/// Split a parameter list on commas. An empty list yields a single empty
/// string, the same for every format.
pub(crate) fn split_params(params: &str) -> Vec<String> {
    params.split(',').map(|p| p.trim().to_string()).collect()
}
