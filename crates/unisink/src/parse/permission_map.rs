//! Permission-map CSV rows.
//!
//! ```text
//! void android.accounts.AccountManager.clearPassword(Account),MANAGE_ACCOUNTS
//! ```
//!
//! Only the first cell is used. These rows carry no source/sink claim and
//! only add known method signatures.

use super::{AnnotationFormat, ParsedFields};
use crate::error::{Result, UnisinkError};
use crate::model::{Origin, SourceOrSink, UNANNOTATED};

/// Parser for permission-map rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMapParser;

impl AnnotationFormat for PermissionMapParser {
    type Raw = [String];

    const ORIGIN: Origin = Origin::PermissionMap;

    fn parse(&self, raw: &[String]) -> Result<Option<ParsedFields>> {
        parse_permission_map_row(raw)
    }
}

/// Parse one permission-map row. Rows whose first cell has no `(` are
/// treated as headers and skipped.
pub fn parse_permission_map_row<S: AsRef<str>>(row: &[S]) -> Result<Option<ParsedFields>> {
    let Some(method_info) = row.first().map(|cell| cell.as_ref().trim()) else {
        return Ok(None);
    };
    if !method_info.contains('(') {
        return Ok(None);
    }

    let (ret_type, rest) = method_info
        .split_once(char::is_whitespace)
        .ok_or_else(|| UnisinkError::malformed(Origin::PermissionMap, "missing return type"))?;

    let signature: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
    let (meth_name, params) = signature
        .split_once('(')
        .ok_or_else(|| UnisinkError::malformed(Origin::PermissionMap, "missing '(' in signature"))?;

    let meth_params = params
        .split(',')
        .map(|p| p.trim_matches(')').to_string())
        .collect();

    Ok(Some(ParsedFields {
        meth_name: meth_name.to_string(),
        meth_params,
        ret_type: ret_type.to_string(),
        source_or_sink: SourceOrSink::Unannotated,
        category: UNANNOTATED.to_string(),
    }))
}
