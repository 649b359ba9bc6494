use core::fmt;

/// Minimal error set for core-domain validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoreError {
    DomainOutOfRange(&'static str),
    Entropy(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            CoreError::Entropy(m) => write!(f, "os entropy unavailable: {m}"),
        }
    }
}

impl std::error::Error for CoreError {}
