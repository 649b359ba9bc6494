//! gs_pipeline: one giftsplit run (validate → classify → allocate → build result → run record).
//! This crate performs no writes; loading goes through `gs_io`, placement math
//! lives in `gs_algo`.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use gs_algo::{classify, reserve_recipients, SkippedRecord};
use gs_core::{rng, variables, AllocRng, Assignment, Params, RawRecord, ResultEntry};
use gs_io::{loader, IoError};

pub mod allocate;
pub mod build_result;
pub mod build_run_record;
pub mod validate;

pub use allocate::{AllocationOutcome, OverBudget, Policy, PolicyCounts, UnderAllocation};
pub use build_result::ResultSummary;
pub use build_run_record::RunRecordDoc;
pub use validate::{Severity, ValidationIssue, ValidationReport};

/// Engine identifiers echoed in the run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// What to do with rows whose price cannot be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricePolicy {
    /// Drop the row and keep going (reported as a warning).
    #[default]
    Skip,
    /// Abort the run.
    Reject,
}

/// Everything a run needs, already in memory.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub records: Vec<RawRecord>,
    pub params: Params,
    pub seed: u64,
    pub input_sha256: String,
    pub engine_meta: EngineMeta,
    pub price_policy: PricePolicy,
}

#[derive(Debug)]
pub struct PipelineOutputs {
    pub entries: Vec<ResultEntry>,
    pub run_record: RunRecordDoc,
    pub validation: ValidationReport,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no records to allocate")]
    EmptyInput,

    #[error("{count} record(s) with malformed price: {detail}")]
    MalformedPrice { count: usize, detail: String },

    #[error("allocation produced no result for {records} input record(s)")]
    NoResult { records: usize },

    #[error("invalid params: {0}")]
    Params(String),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("no seed given and the OS RNG failed: {0}")]
    Entropy(String),

    #[error("build: {0}")]
    Build(String),
}

/// Run the pipeline over an already-loaded context.
pub fn run_with_ctx(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    variables::validate_domains(&ctx.params).map_err(|e| PipelineError::Params(e.to_string()))?;

    // --- CLASSIFY + VALIDATE ---
    let classified = classify(&ctx.records, &ctx.params.child_marker);
    let validation = validate::validate_input(&ctx.records, &classified, ctx.price_policy);
    for issue in validation.warnings() {
        tracing::warn!(code = issue.code, "{}", issue.message);
    }
    let validation = validation.into_result()?;

    // --- ALLOCATE ---
    let mut assigned = Assignment::new();
    reserve_recipients(&classified, &mut assigned);
    tracing::info!(
        seed = ctx.seed,
        max_price = ctx.params.max_price,
        recipients = assigned.len(),
        links = classified.links.len(),
        "allocating"
    );
    let mut rng = AllocRng::from_seed_u64(ctx.seed);
    let outcome = allocate::allocate_all(classified.links.clone(), assigned, &ctx.params, &mut rng);

    // --- BUILD_RESULT ---
    let (entries, summary) = build_result::build_result(&outcome.assigned);
    validate::check_result(ctx.records.len(), &entries)?;

    // --- BUILD_RUN_RECORD ---
    let counts = build_run_record::RunCounts {
        records: ctx.records.len(),
        skipped: classified.skipped.len(),
        recipients: entries.len(),
        links: classified.links.len(),
        policies: outcome.counts,
    };
    let run_record = build_run_record::build_run_record(build_run_record::RunRecordInputs {
        engine: &ctx.engine_meta,
        seed: ctx.seed,
        params: &ctx.params,
        input_sha256: &ctx.input_sha256,
        counts,
        summary,
        outcome: &outcome,
        entries: &entries,
    })?;

    Ok(PipelineOutputs { entries, run_record, validation, skipped: classified.skipped })
}

/// Seed precedence: explicit params seed, else fresh OS entropy.
pub fn resolve_seed(params: &Params) -> Result<u64, PipelineError> {
    match params.seed {
        Some(seed) => Ok(seed),
        None => rng::seed_from_os().map_err(|e| PipelineError::Entropy(e.to_string())),
    }
}

/// Convenience entry: load records from `path`, then run with `params`.
pub fn run_from_path<P: AsRef<Path>>(
    path: P,
    params: Params,
    price_policy: PricePolicy,
) -> Result<PipelineOutputs, PipelineError> {
    let loaded = loader::load_records(path.as_ref())?;
    let seed = resolve_seed(&params)?;
    run_with_ctx(PipelineCtx {
        records: loaded.records,
        params,
        seed,
        input_sha256: loaded.sha256,
        engine_meta: engine_identifiers(),
        price_policy,
    })
}

/// Engine identifiers for the run record.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "giftsplit".to_string(),
        name: "gs_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: "dev".to_string(),
    }
}
