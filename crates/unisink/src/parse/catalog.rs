//! SuSi catalog lines.
//!
//! ```text
//! <com.android.server.WifiService: int getFrequencyBand()> (NETWORK_INFORMATION)
//! ```
//!
//! The catalog splits sources and sinks into separate files, so the kind of
//! every line comes from the file rather than the line.

use super::{split_params, AnnotationFormat, ParsedFields};
use crate::error::{Result, UnisinkError};
use crate::model::{Origin, SourceOrSink};

/// Parser for catalog lines from one file.
#[derive(Debug, Clone, Copy)]
pub struct CatalogParser {
    source_or_sink: SourceOrSink,
}

impl CatalogParser {
    /// Parser whose lines all carry `source_or_sink`.
    pub fn new(source_or_sink: SourceOrSink) -> Self {
        Self { source_or_sink }
    }

    /// Parser for a catalog file, deriving the kind from its name.
    ///
    /// Names implying neither kind produce `unannotated` records.
    pub fn for_file_name(name: &str) -> Self {
        Self::new(SourceOrSink::from_file_name(name).unwrap_or(SourceOrSink::Unannotated))
    }

    pub fn source_or_sink(&self) -> SourceOrSink {
        self.source_or_sink
    }
}

impl AnnotationFormat for CatalogParser {
    type Raw = str;

    const ORIGIN: Origin = Origin::Catalog;

    fn parse(&self, raw: &str) -> Result<Option<ParsedFields>> {
        parse_catalog_line(raw, self.source_or_sink)
    }
}

/// Parse one catalog line. Lines not starting with `<` are category headers.
pub fn parse_catalog_line(line: &str, source_or_sink: SourceOrSink) -> Result<Option<ParsedFields>> {
    let line = line.trim();
    let Some(body) = line.strip_prefix('<') else {
        return Ok(None);
    };

    let (meth_info, annotation) = body
        .split_once("> ")
        .ok_or_else(|| UnisinkError::malformed(Origin::Catalog, "missing '> ' after signature"))?;

    let mut tokens = meth_info.split_whitespace();
    let (Some(class_name), Some(ret_type), Some(method)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(UnisinkError::malformed(
            Origin::Catalog,
            "expected '<Class: Return method(params)>'",
        ));
    };

    let (name, params) = method
        .split_once('(')
        .ok_or_else(|| UnisinkError::malformed(Origin::Catalog, "missing '(' in signature"))?;
    let params = params.split(')').next().unwrap_or_default();

    let category = annotation
        .split_whitespace()
        .last()
        .map(|tok| tok.trim_matches(|c| c == ' ' || c == '(' || c == ')'))
        .ok_or_else(|| UnisinkError::malformed(Origin::Catalog, "missing category"))?;

    Ok(Some(ParsedFields {
        meth_name: format!("{}.{}", class_name.trim_matches(':'), name),
        meth_params: split_params(params),
        ret_type: ret_type.to_string(),
        source_or_sink,
        category: category.to_string(),
    }))
}
