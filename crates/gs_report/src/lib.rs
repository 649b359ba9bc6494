//! gs_report: pure offline renderers for an allocation result.
//!
//! Rules:
//! - No I/O here. Callers pass `ResultEntry` rows already in memory and write
//!   the returned strings themselves.
//! - Renderers never recompute totals or sharing; they only format.
//! - Stable order: recipients ascending by name, portions in bucket order.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod render_json;
pub mod render_text;
pub mod structure;

pub use render_json::{render_document_json, render_document_yaml};
pub use render_text::{render_recipient_text, report_file_name, report_file_names};
pub use structure::{map_entries, LinkDoc, RecipientDoc, SharedDoc};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("json render failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml render failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output flavours the CLI can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportFormat {
    Yaml,
    Json,
    Text,
}

impl ReportFormat {
    /// File name of the structured document, `None` for the per-recipient text set.
    pub fn document_file_name(self) -> Option<&'static str> {
        match self {
            ReportFormat::Yaml => Some("allocation.yaml"),
            ReportFormat::Json => Some("allocation.json"),
            ReportFormat::Text => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_names() {
        assert_eq!(ReportFormat::Yaml.document_file_name(), Some("allocation.yaml"));
        assert_eq!(ReportFormat::Json.document_file_name(), Some("allocation.json"));
        assert_eq!(ReportFormat::Text.document_file_name(), None);
    }
}
