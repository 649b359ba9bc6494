// crates/gs_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, logging, the validate-only
// short-circuit, and the full run path (params → load → pipeline → files).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const SELF_VERIFY: i32 = 3;
    pub const IO: i32 = 4;
}

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};

use gs_core::{variables, Params};
use gs_io::{canonical_json, loader};
use gs_pipeline::{resolve_seed, run_with_ctx, validate, PipelineCtx, PipelineError, PipelineOutputs, PricePolicy};
use gs_report::{render_document_json, render_document_yaml, render_recipient_text, report_file_names, ReportFormat};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad input data or params (empty list, malformed prices under strict, domains)
    Validation(String),
    /// Allocation ran but produced nothing for a non-empty input
    SelfVerify(String),
    /// I/O errors (read/write/path/limits)
    Io(String),
    /// Rendering errors (report build or output)
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::SelfVerify(m) => write!(f, "self-verify: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("giftsplit: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(args.verbose, args.quiet);

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match result {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("giftsplit: error: {e}");
            map_error(&e)
        }
    };

    ExitCode::from(rc as u8)
}

/// stderr subscriber; `RUST_LOG` overrides the -v/--quiet derived level.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn price_policy(args: &Args) -> PricePolicy {
    if args.strict_prices {
        PricePolicy::Reject
    } else {
        PricePolicy::Skip
    }
}

/// Config file first, then flag overrides, then a domain check of the merge.
fn effective_params(args: &Args) -> Result<Params, MainError> {
    let mut params = match &args.config {
        Some(path) => loader::load_params(path).map_err(map_io_err)?,
        None => Params::default(),
    };
    if let Some(max_price) = args.max_price {
        params.max_price = max_price;
    }
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    variables::validate_domains(&params).map_err(|e| MainError::Validation(e.to_string()))?;
    Ok(params)
}

/// Validate-only path (no allocation, no files).
fn validate_only(args: &Args) -> Result<(), MainError> {
    let params = effective_params(args)?;
    let loaded = loader::load_records(&args.input).map_err(map_io_err)?;
    let classified = gs_algo::classify(&loaded.records, &params.child_marker);
    let report = validate::validate_input(&loaded.records, &classified, price_policy(args));
    for issue in &report.issues {
        tracing::warn!(code = issue.code, severity = ?issue.severity, "{}", issue.message);
    }
    report.into_result().map_err(map_pipeline_err)?;

    if !args.quiet {
        eprintln!(
            "validate-only: {} record(s), {} recipient(s), {} skipped: OK",
            loaded.records.len(),
            classified.recipients.len(),
            classified.skipped.len()
        );
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let params = effective_params(args)?;
    let loaded = loader::load_records(&args.input).map_err(map_io_err)?;
    let seed = resolve_seed(&params).map_err(map_pipeline_err)?;

    let ctx = PipelineCtx {
        records: loaded.records,
        params,
        seed,
        input_sha256: loaded.sha256,
        engine_meta: gs_pipeline::engine_identifiers(),
        price_policy: price_policy(args),
    };
    let outs = run_with_ctx(ctx).map_err(map_pipeline_err)?;

    write_outputs(&args.out, &args.formats(), &outs)?;

    if !args.quiet {
        eprintln!(
            "run: {} recipient(s), seed {}, written to {}",
            outs.entries.len(),
            outs.run_record.seed,
            args.out.to_string_lossy()
        );
    }
    Ok(())
}

fn write_outputs(out_dir: &Path, formats: &[ReportFormat], outs: &PipelineOutputs) -> Result<(), MainError> {
    fs::create_dir_all(out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.to_string_lossy())))?;

    for &format in formats {
        match format {
            ReportFormat::Yaml | ReportFormat::Json => {
                let rendered = match format {
                    ReportFormat::Yaml => render_document_yaml(&outs.entries),
                    _ => render_document_json(&outs.entries),
                };
                let text = rendered.map_err(|e| MainError::Render(e.to_string()))?;
                if let Some(name) = format.document_file_name() {
                    write_text(&out_dir.join(name), &text)?;
                }
            }
            ReportFormat::Text => write_recipient_texts(out_dir, outs)?,
        }
    }

    let run_path = out_dir.join("run_record.json");
    canonical_json::write_canonical_file(&outs.run_record, &run_path)
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;
    Ok(())
}

/// `recipients/<name>.txt`; names that sanitize to the same file get a numeric suffix.
fn write_recipient_texts(out_dir: &Path, outs: &PipelineOutputs) -> Result<(), MainError> {
    let dir = out_dir.join("recipients");
    fs::create_dir_all(&dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", dir.to_string_lossy())))?;

    let files = report_file_names(outs.entries.iter().map(|e| e.name.as_str()));
    for (entry, file) in outs.entries.iter().zip(&files) {
        write_text(&dir.join(file), &render_recipient_text(entry))?;
    }
    tracing::info!(files = files.len(), dir = %dir.display(), "recipient reports written");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<(), MainError> {
    canonical_json::write_text_atomic(path, text).map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::SelfVerify(_) => SELF_VERIFY,
        MainError::Io(_) => IO,
        MainError::Render(_) => IO,
    }
}

/// Translate gs_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: gs_io::IoError) -> MainError {
    use gs_io::IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Yaml(m) => MainError::Validation(format!("yaml: {m}")),
        Invalid(m) => MainError::Validation(m),
        Hash(m) => MainError::Validation(format!("hash: {m}")),

        Path(m) => MainError::Io(format!("path: {m}")),
        Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

/// Translate gs_pipeline::PipelineError into MainError buckets.
fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::EmptyInput | PipelineError::MalformedPrice { .. } | PipelineError::Params(_) => {
            MainError::Validation(e.to_string())
        }
        PipelineError::NoResult { .. } | PipelineError::Build(_) => MainError::SelfVerify(e.to_string()),
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Entropy(m) => MainError::Io(format!("entropy: {m}")),
    }
}
