//! Price normalization.
//!
//! Accepted shapes:
//! - a non-negative integer (`250`)
//! - a currency string `"<digits> zł"` (`"250 zł"`, `"250zł"`, `" 250 zł "`)
//!
//! Everything else is malformed, floats included (even `250.0`): prices are
//! whole złoty.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Currency suffix recognised in text prices.
pub const CURRENCY_SUFFIX: &str = "zł";

/// Price as it arrives on the wire, before normalization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawPrice {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<u64> for RawPrice {
    fn from(v: u64) -> Self {
        RawPrice::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<&str> for RawPrice {
    fn from(s: &str) -> Self {
        RawPrice::Text(s.to_string())
    }
}

/// Why a price could not be normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceError {
    Missing,
    Negative(i64),
    NotInteger(String),
    Malformed(String),
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::Missing => write!(f, "price is missing"),
            PriceError::Negative(v) => write!(f, "price is negative: {v}"),
            PriceError::NotInteger(v) => write!(f, "price is not a whole number: {v}"),
            PriceError::Malformed(v) => {
                write!(f, "price is neither an integer nor \"<int> {CURRENCY_SUFFIX}\": {v:?}")
            }
        }
    }
}

impl std::error::Error for PriceError {}

/// Normalize a wire price into whole currency units.
pub fn parse_price(raw: &RawPrice) -> Result<u64, PriceError> {
    match raw {
        RawPrice::Int(v) => u64::try_from(*v).map_err(|_| PriceError::Negative(*v)),
        RawPrice::Float(v) => Err(PriceError::NotInteger(v.to_string())),
        RawPrice::Text(s) => parse_price_text(s),
    }
}

/// Same as `parse_price`, treating an absent field as `PriceError::Missing`.
pub fn parse_price_opt(raw: Option<&RawPrice>) -> Result<u64, PriceError> {
    raw.map_or(Err(PriceError::Missing), parse_price)
}

fn parse_price_text(s: &str) -> Result<u64, PriceError> {
    let malformed = || PriceError::Malformed(s.to_string());
    let digits = s
        .trim()
        .strip_suffix(CURRENCY_SUFFIX)
        .ok_or_else(malformed)?
        .trim_end();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits.parse::<u64>().map_err(|_| malformed())
}

/// Render a whole-unit amount the way reports print it (`"250 zł"`).
pub fn format_price(amount: u64) -> String {
    format!("{amount} {CURRENCY_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_passes_through() {
        assert_eq!(parse_price(&RawPrice::Int(250)), Ok(250));
        assert_eq!(parse_price(&RawPrice::Int(0)), Ok(0));
    }

    #[test]
    fn currency_text_normalizes() {
        assert_eq!(parse_price(&"250 zł".into()), Ok(250));
        assert_eq!(parse_price(&"250zł".into()), Ok(250));
        assert_eq!(parse_price(&"  1200 zł ".into()), Ok(1200));
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(matches!(parse_price(&"250".into()), Err(PriceError::Malformed(_))));
        assert!(matches!(parse_price(&"zł".into()), Err(PriceError::Malformed(_))));
        assert!(matches!(parse_price(&"1 250 zł".into()), Err(PriceError::Malformed(_))));
        assert!(matches!(parse_price(&"-5 zł".into()), Err(PriceError::Malformed(_))));
        assert!(matches!(parse_price(&"abc zł".into()), Err(PriceError::Malformed(_))));
        assert_eq!(parse_price(&RawPrice::Int(-3)), Err(PriceError::Negative(-3)));
        assert!(matches!(parse_price(&RawPrice::Float(9.5)), Err(PriceError::NotInteger(_))));
        assert_eq!(parse_price_opt(None), Err(PriceError::Missing));
    }

    #[test]
    fn formats_with_currency() {
        assert_eq!(format_price(600), "600 zł");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn untagged_wire_shapes() {
        let v: Vec<RawPrice> = serde_json::from_str(r#"[120, "80 zł", 1.5]"#).unwrap();
        assert_eq!(v[0], RawPrice::Int(120));
        assert_eq!(v[1], RawPrice::Text("80 zł".into()));
        assert_eq!(v[2], RawPrice::Float(1.5));
    }
}
