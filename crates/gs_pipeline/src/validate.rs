//! crates/gs_pipeline/src/validate.rs
//! Checks before allocation (input shape, prices) and after it (non-empty
//! result). Deterministic: issues are sorted before they are reported.

use gs_algo::Classified;
use gs_core::{RawRecord, ResultEntry};

use crate::{PipelineError, PricePolicy};

pub const CODE_INPUT_EMPTY: &str = "Input.Empty";
pub const CODE_PRICE_MALFORMED: &str = "Price.Malformed";
pub const CODE_NO_RECIPIENTS: &str = "Recipients.None";

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityRef {
    Root,
    /// 0-based input row.
    Record(usize),
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// pass = no Error-severity issue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// Turn the first blocking issue into the matching pipeline error.
    pub fn into_result(self) -> Result<ValidationReport, PipelineError> {
        if self.pass {
            return Ok(self);
        }
        if self.errors().any(|i| i.code == CODE_INPUT_EMPTY) {
            return Err(PipelineError::EmptyInput);
        }
        let malformed: Vec<String> = self
            .errors()
            .filter(|i| i.code == CODE_PRICE_MALFORMED)
            .map(|i| i.message.clone())
            .collect();
        if !malformed.is_empty() {
            return Err(PipelineError::MalformedPrice { count: malformed.len(), detail: malformed.join("; ") });
        }
        let rest: Vec<String> = self.errors().map(|i| format!("{}: {}", i.code, i.message)).collect();
        Err(PipelineError::Build(rest.join("; ")))
    }
}

/// Pre-allocation checks.
pub fn validate_input(records: &[RawRecord], classified: &Classified, policy: PricePolicy) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    issues.extend(check_not_empty(records));
    issues.extend(check_prices(classified, policy));
    issues.extend(check_recipients(records, classified));

    sort_issues_stably(&mut issues);

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

/// Post-allocation check: non-empty input must yield at least one row.
pub fn check_result(record_count: usize, entries: &[ResultEntry]) -> Result<(), PipelineError> {
    if record_count > 0 && entries.is_empty() {
        return Err(PipelineError::NoResult { records: record_count });
    }
    Ok(())
}

fn check_not_empty(records: &[RawRecord]) -> Vec<ValidationIssue> {
    if records.is_empty() {
        vec![ValidationIssue {
            severity: Severity::Error,
            code: CODE_INPUT_EMPTY,
            message: "no records to allocate".into(),
            where_: EntityRef::Root,
        }]
    } else {
        Vec::new()
    }
}

fn check_prices(classified: &Classified, policy: PricePolicy) -> Vec<ValidationIssue> {
    let severity = match policy {
        PricePolicy::Skip => Severity::Warning,
        PricePolicy::Reject => Severity::Error,
    };
    classified
        .skipped
        .iter()
        .map(|s| ValidationIssue {
            severity,
            code: CODE_PRICE_MALFORMED,
            message: format!("row {} ({}, {}): {}", s.index + 1, s.name, s.link, s.reason),
            where_: EntityRef::Record(s.index),
        })
        .collect()
}

/// Only child-source rows: nothing can receive them. The run still proceeds
/// and fails later with `NoResult`; this warning names the cause.
fn check_recipients(records: &[RawRecord], classified: &Classified) -> Vec<ValidationIssue> {
    if !records.is_empty() && classified.recipients.is_empty() {
        vec![ValidationIssue {
            severity: Severity::Warning,
            code: CODE_NO_RECIPIENTS,
            message: "every input name is a child source; nobody can receive links".into(),
            where_: EntityRef::Root,
        }]
    } else {
        Vec::new()
    }
}

fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.code.cmp(b.code))
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });
}
