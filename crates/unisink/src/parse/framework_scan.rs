//! DroidSafe framework-scan lines.
//!
//! ```text
//! void android.content.ContentProviderResult.writeToParcel(Parcel,int) - @DSSink({DSSinkKind.SENSITIVE_UNCATEGORIZED}) - @DSGenerator(...)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::{split_params, AnnotationFormat, ParsedFields};
use crate::error::{Result, UnisinkError};
use crate::model::{Origin, SourceOrSink, NO_CATEGORY};

/// Annotation tags, the kind they imply, and the pattern for their category.
static KIND_TAGS: Lazy<Vec<(&'static str, SourceOrSink, Regex)>> = Lazy::new(|| {
    vec![
        (
            "DSSource",
            SourceOrSink::Source,
            Regex::new(r".*DSSourceKind\.([^}]*)").unwrap(),
        ),
        (
            "DSSink",
            SourceOrSink::Sink,
            Regex::new(r".*DSSinkKind\.([^}]*)").unwrap(),
        ),
    ]
});

static FINAL_MODIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfinal\b").unwrap());

/// Parser for framework-scan lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameworkScanParser;

impl AnnotationFormat for FrameworkScanParser {
    type Raw = str;

    const ORIGIN: Origin = Origin::FrameworkScan;

    fn parse(&self, raw: &str) -> Result<Option<ParsedFields>> {
        parse_framework_scan_line(raw)
    }
}

/// Parse one framework-scan line.
///
/// Native methods and blank lines are skipped. Lines without a source or
/// sink annotation are `none` with category `NO_CATEGORY`.
pub fn parse_framework_scan_line(line: &str) -> Result<Option<ParsedFields>> {
    let mut pieces = line.trim().split('@');
    let method_part = pieces.next().unwrap_or_default().trim();

    if method_part.is_empty() || method_part.starts_with("native") {
        return Ok(None);
    }

    let (ret_type, rest) = method_part
        .split_once(char::is_whitespace)
        .ok_or_else(|| UnisinkError::malformed(Origin::FrameworkScan, "missing return type"))?;
    let rest = rest.trim_start();

    let open = rest
        .find('(')
        .ok_or_else(|| UnisinkError::malformed(Origin::FrameworkScan, "missing '(' in signature"))?;
    let close = rest[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| UnisinkError::malformed(Origin::FrameworkScan, "missing ')' in signature"))?;

    let meth_name = rest[..open].trim().to_string();
    let meth_params = split_params(&FINAL_MODIFIER.replace_all(&rest[open + 1..close], ""));

    let mut source_or_sink = SourceOrSink::Neither;
    let mut category = NO_CATEGORY.to_string();

    for piece in pieces {
        for (tag, kind, pattern) in KIND_TAGS.iter() {
            if piece.starts_with(tag) {
                source_or_sink = *kind;
                category = match pattern.captures(piece) {
                    Some(caps) => caps[1].trim().to_string(),
                    None => {
                        tracing::debug!(line, "{} annotation without a kind", tag);
                        NO_CATEGORY.to_string()
                    }
                };
            }
        }
    }

    Ok(Some(ParsedFields {
        meth_name,
        meth_params,
        ret_type: ret_type.to_string(),
        source_or_sink,
        category,
    }))
}
