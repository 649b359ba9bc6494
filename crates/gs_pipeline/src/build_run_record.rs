//! BUILD_RUN_RECORD stage: the artifact that lets anyone replay and audit a
//! run. The id is `RUN:` + SHA-256 of the canonical id-less body, so two runs
//! with the same input, params and seed carry the same id.

use serde::{Deserialize, Serialize};

use gs_core::{Params, ResultEntry};
use gs_io::hasher;

use crate::allocate::{AllocationOutcome, OverBudget, PolicyCounts, UnderAllocation};
use crate::build_result::ResultSummary;
use crate::{EngineMeta, PipelineError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsEcho {
    pub max_price: u64,
    pub link_count_weight: u64,
    pub child_marker: String,
}

impl From<&Params> for ParamsEcho {
    fn from(p: &Params) -> Self {
        Self {
            max_price: p.max_price,
            link_count_weight: p.link_count_weight,
            child_marker: p.child_marker.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub records: usize,
    pub skipped: usize,
    pub recipients: usize,
    pub links: usize,
    pub policies: PolicyCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunRecordDoc {
    pub id: String,
    pub engine: EngineMeta,
    pub seed: u64,
    pub params: ParamsEcho,
    pub input_sha256: String,
    pub counts: RunCounts,
    pub summary: ResultSummary,
    pub under_allocations: Vec<UnderAllocation>,
    pub over_budget: Vec<OverBudget>,
    pub result_sha256: String,
}

pub struct RunRecordInputs<'a> {
    pub engine: &'a EngineMeta,
    pub seed: u64,
    pub params: &'a Params,
    pub input_sha256: &'a str,
    pub counts: RunCounts,
    pub summary: ResultSummary,
    pub outcome: &'a AllocationOutcome,
    pub entries: &'a [ResultEntry],
}

pub fn build_run_record(inp: RunRecordInputs<'_>) -> Result<RunRecordDoc, PipelineError> {
    let result_sha256 = hasher::sha256_canonical(&inp.entries).map_err(|e| PipelineError::Build(e.to_string()))?;
    let params = ParamsEcho::from(inp.params);

    #[derive(Serialize)]
    struct RunNoId<'a> {
        engine: &'a EngineMeta,
        seed: u64,
        params: &'a ParamsEcho,
        input_sha256: &'a str,
        counts: &'a RunCounts,
        summary: &'a ResultSummary,
        under_allocations: &'a [UnderAllocation],
        over_budget: &'a [OverBudget],
        result_sha256: &'a str,
    }
    let body = RunNoId {
        engine: inp.engine,
        seed: inp.seed,
        params: &params,
        input_sha256: inp.input_sha256,
        counts: &inp.counts,
        summary: &inp.summary,
        under_allocations: &inp.outcome.under_allocations,
        over_budget: &inp.outcome.over_budget,
        result_sha256: &result_sha256,
    };
    let id = hasher::run_id_from_canonical(&body).map_err(|e| PipelineError::Build(e.to_string()))?;

    Ok(RunRecordDoc {
        id,
        engine: inp.engine.clone(),
        seed: inp.seed,
        params,
        input_sha256: inp.input_sha256.to_string(),
        counts: inp.counts,
        summary: inp.summary,
        under_allocations: inp.outcome.under_allocations.clone(),
        over_budget: inp.outcome.over_budget.clone(),
        result_sha256,
    })
}
