//! Structured document renderers. Both flavours serialize the same
//! `RecipientDoc` list, so key order follows the struct declaration.

use crate::structure::{map_entries, RecipientDoc};
use crate::ReportError;
use gs_core::ResultEntry;

/// Pretty JSON, trailing newline. Non-ASCII is kept verbatim.
pub fn render_document_json(entries: &[ResultEntry]) -> Result<String, ReportError> {
    let docs: Vec<RecipientDoc> = map_entries(entries);
    let mut out = serde_json::to_string_pretty(&docs)?;
    out.push('\n');
    Ok(out)
}

pub fn render_document_yaml(entries: &[ResultEntry]) -> Result<String, ReportError> {
    let docs: Vec<RecipientDoc> = map_entries(entries);
    Ok(serde_yaml::to_string(&docs)?)
}
