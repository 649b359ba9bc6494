//! Loader: read local record lists and params (YAML or JSON) into typed core
//! values. Format follows the file extension: `.json` is JSON, anything else
//! is YAML. No network I/O.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gs_core::{
    variables::{self, Params},
    RawRecord,
};

use crate::{hasher, IoError, IoResult};

/// Hard cap on input file size.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocFormat::Json,
            _ => DocFormat::Yaml,
        }
    }
}

/// Records as read from disk, plus the digest of the raw file bytes.
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: Vec<RawRecord>,
    pub format: DocFormat,
    pub sha256: String,
}

pub fn load_records(path: &Path) -> IoResult<LoadedRecords> {
    let bytes = read_with_limits(path)?;
    let format = DocFormat::from_path(path);
    let records = parse_records(&bytes, format)?;
    tracing::info!(path = %path.display(), records = records.len(), ?format, "records loaded");
    Ok(LoadedRecords { records, format, sha256: hasher::sha256_hex(&bytes) })
}

/// Parse a record list. A blank or `null` document is an empty list; emptiness
/// is judged by the pipeline, not here.
pub fn parse_records(bytes: &[u8], format: DocFormat) -> IoResult<Vec<RawRecord>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<RawRecord>> = match format {
        DocFormat::Json => serde_json::from_slice(bytes)?,
        DocFormat::Yaml => serde_yaml::from_slice(bytes)?,
    };
    Ok(parsed.unwrap_or_default())
}

/// Load a params file and check domains.
pub fn load_params(path: &Path) -> IoResult<Params> {
    let bytes = read_with_limits(path)?;
    let params = parse_params(&bytes, DocFormat::from_path(path))?;
    tracing::debug!(path = %path.display(), ?params, "params loaded");
    Ok(params)
}

pub fn parse_params(bytes: &[u8], format: DocFormat) -> IoResult<Params> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Params::default());
    }
    let params: Params = match format {
        DocFormat::Json => serde_json::from_slice(bytes)?,
        DocFormat::Yaml => serde_yaml::from_slice(bytes)?,
    };
    variables::validate_domains(&params).map_err(|e| IoError::Invalid(format!("params: {e}")))?;
    Ok(params)
}

fn read_with_limits(path: &Path) -> IoResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let len = file.metadata()?.len();
    if len > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {len} bytes (max {MAX_INPUT_BYTES})",
            path.display()
        )));
    }
    let mut buf = Vec::with_capacity(len as usize);
    file.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{} grew past {MAX_INPUT_BYTES} bytes", path.display())));
    }
    Ok(buf)
}
