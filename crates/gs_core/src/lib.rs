//! gs_core: Core types, price normalization, parameters, and seeded RNG.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`gs_io`, `gs_algo`, `gs_pipeline`, `gs_report`, `gs_cli`).
//!
//! - Input contract: `RawRecord` / `RawPrice`
//! - Classified links and the owned `Assignment` aggregate
//! - Output unit: `ResultEntry`
//! - `Params` (budget ceiling, score weight, child marker, seed)
//! - Seedable RNG (ChaCha20) for shuffling and child-link targets
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;
pub mod errors;
pub mod price;
pub mod rng;
pub mod variables;

pub use entities::{Assignment, LinkRecord, Portion, RawRecord, ResultEntry, SharedLink};
pub use errors::CoreError;
pub use price::{parse_price, PriceError, RawPrice};
pub use rng::AllocRng;
pub use variables::Params;
