//! crates/gs_io/src/hasher.rs
//!
//! SHA-256 digests for inputs and artifacts.
//!
//! - Use `sha256_canonical(..)` for JSON **values/structs** (goes through canonical_json).
//! - Use `sha256_hex(..)` for **raw input bytes**.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

pub const RUN_ID_PREFIX: &str = "RUN:";

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/// `RUN:<sha256>` over the canonical bytes of an id-less run body.
pub fn run_id_from_canonical<T: Serialize>(body: &T) -> IoResult<String> {
    Ok(format!("{RUN_ID_PREFIX}{}", sha256_canonical(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_lower_hex_64(s: &str) -> bool {
        s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = sha256_canonical(&json!({"x": 1, "y": [1, 2]})).unwrap();
        let b = sha256_canonical(&json!({"y": [1, 2], "x": 1})).unwrap();
        assert_eq!(a, b);
        assert!(is_lower_hex_64(&a));
    }

    #[test]
    fn run_id_shape() {
        let id = run_id_from_canonical(&json!({"seed": 1})).unwrap();
        let hex = id.strip_prefix(RUN_ID_PREFIX).unwrap();
        assert!(is_lower_hex_64(hex));
    }
}
