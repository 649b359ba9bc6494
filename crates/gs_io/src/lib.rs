//! crates/gs_io/src/lib.rs
//! Boundary I/O crate: everything that touches the filesystem or a wire
//! format lives here, so `gs_core`/`gs_algo` stay pure.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Public surface kept small; details live in submodules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for gs_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// YAML serialization/deserialization errors.
    #[error("yaml error: {0}")]
    Yaml(String),

    /// Hashing/canonicalization failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Input exceeds a hard size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; report line/column instead.
        IoError::Json {
            pointer: format!("line {} column {}", e.line(), e.column()),
            msg: e.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for IoError {
    fn from(e: serde_yaml::Error) -> Self {
        IoError::Yaml(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
