//! BUILD_RESULT stage: shared-link resolution and one `ResultEntry` per
//! recipient, plus a small summary echoed into the run record.

use serde::Serialize;

use gs_algo::build_entries;
use gs_core::{Assignment, ResultEntry};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub recipients: usize,
    /// Portions across all recipients (a split link counts once per holder).
    pub portions: usize,
    pub shared_portions: usize,
    pub total_assigned: u64,
}

pub fn build_result(assigned: &Assignment) -> (Vec<ResultEntry>, ResultSummary) {
    let entries = build_entries(assigned);
    let summary = ResultSummary {
        recipients: entries.len(),
        portions: entries.iter().map(|e| e.links.len()).sum(),
        shared_portions: entries.iter().map(|e| e.shared.len()).sum(),
        total_assigned: entries.iter().fold(0u64, |acc, e| acc.saturating_add(e.total)),
    };
    tracing::debug!(?summary, "result built");
    (entries, summary)
}
