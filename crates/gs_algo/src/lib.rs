// crates/gs_algo/src/lib.rs
#![forbid(unsafe_code)]

pub use gs_core::{Assignment, LinkRecord, Portion, RawRecord, ResultEntry, SharedLink};

// ----------------------------- Classification ---------------------------------------

pub mod classify;

pub use classify::{classify, is_child_source, reserve_recipients, Classified, SkippedRecord};

// ----------------------------- Placement policies -----------------------------------

pub mod allocation {
    pub mod child;
    pub mod oversized;
    pub mod standard;

    pub use child::reassign_child;
    pub use oversized::{split_oversized, SplitOutcome};
    pub use standard::{assign_standard, StandardPlacement};
}

pub use allocation::{assign_standard, reassign_child, split_oversized, SplitOutcome, StandardPlacement};

// ----------------------------- Shared links & assembly ------------------------------

pub mod shared;

pub use shared::{build_entries, shared_links, HolderIndex};
