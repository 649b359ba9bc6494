//! Run parameters and their domains.
//!
//! Notes:
//! - `max_price` is the per-recipient budget ceiling; `0` is rejected.
//! - `link_count_weight` scales the link-count term of the standard
//!   placement score (`total + count * weight`).
//! - `child_marker` is matched case-insensitively as a substring of the name.
//! - `seed` is optional; absent means "draw one from the OS". The seed that
//!   was actually used is echoed in the run record either way.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_MAX_PRICE: u64 = 600;
pub const DEFAULT_LINK_COUNT_WEIGHT: u64 = 10;
pub const DEFAULT_CHILD_MARKER: &str = "dziecko:";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Params {
    pub max_price: u64,
    pub link_count_weight: u64,
    pub child_marker: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            link_count_weight: DEFAULT_LINK_COUNT_WEIGHT,
            child_marker: DEFAULT_CHILD_MARKER.to_string(),
            seed: None,
        }
    }
}

impl Params {
    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Domain checks; call after every merge of config sources.
pub fn validate_domains(p: &Params) -> Result<(), CoreError> {
    if p.max_price == 0 {
        return Err(CoreError::DomainOutOfRange("max_price"));
    }
    if p.child_marker.trim().is_empty() {
        return Err(CoreError::DomainOutOfRange("child_marker"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = Params::default();
        assert_eq!(p.max_price, 600);
        assert_eq!(p.link_count_weight, 10);
        assert_eq!(p.child_marker, "dziecko:");
        assert!(p.seed.is_none());
        assert!(validate_domains(&p).is_ok());
    }

    #[test]
    fn zero_budget_and_blank_marker_rejected() {
        let p = Params::default().with_max_price(0);
        assert_eq!(validate_domains(&p), Err(CoreError::DomainOutOfRange("max_price")));

        let p = Params { child_marker: "  ".into(), ..Params::default() };
        assert_eq!(validate_domains(&p), Err(CoreError::DomainOutOfRange("child_marker")));
    }
}
