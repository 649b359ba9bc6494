//! ALLOCATE stage: the driver that walks every classified link once.
//!
//! Input: classified links, an `Assignment` with every recipient reserved,
//! `Params`, and the run's `AllocRng`.
//! Output: the final `Assignment` plus what the policies could not honour:
//! under-allocations (price left unplaced) and over-budget placements.
//!
//! Order: the link list is shuffled once; after that the queue is drained
//! front to back. Every iteration removes exactly one link, so the loop ends.
//! Dispatch: `price > max_price` → oversized split (checked first, child or
//! not); child source → reassign; otherwise → standard placement.

use std::collections::VecDeque;

use serde::Serialize;

use gs_algo::{assign_standard, reassign_child, split_oversized, StandardPlacement};
use gs_core::{AllocRng, Assignment, LinkRecord, Params};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    OversizedSplit,
    ChildReassign,
    StandardAssign,
}

/// Price of a link that could not be fully placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnderAllocation {
    pub link: String,
    pub owner: String,
    pub price: u64,
    pub placed: u64,
    pub dropped: u64,
    pub policy: Policy,
}

/// A placement that left its recipient above the ceiling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverBudget {
    pub recipient: String,
    pub link: String,
    pub total_after: u64,
    pub policy: Policy,
}

/// How many links each policy handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyCounts {
    pub oversized: usize,
    pub child: usize,
    pub standard: usize,
    pub owner_fallback: usize,
}

#[derive(Clone, Debug, Default)]
pub struct AllocationOutcome {
    pub assigned: Assignment,
    pub under_allocations: Vec<UnderAllocation>,
    pub over_budget: Vec<OverBudget>,
    pub counts: PolicyCounts,
}

pub fn allocate_all(
    mut links: Vec<LinkRecord>,
    assigned: Assignment,
    params: &Params,
    rng: &mut AllocRng,
) -> AllocationOutcome {
    rng.shuffle_in_place(&mut links);
    let mut remaining: VecDeque<LinkRecord> = links.into();
    let max_price = params.max_price;

    let mut out = AllocationOutcome { assigned, ..AllocationOutcome::default() };

    while let Some(item) = remaining.pop_front() {
        if item.price > max_price {
            out.counts.oversized += 1;
            let split = split_oversized(&item, &mut out.assigned, max_price);
            if split.dropped > 0 {
                tracing::warn!(
                    link = %item.link, price = item.price, dropped = split.dropped,
                    "not enough free budget to place the whole oversized link"
                );
                out.under_allocations.push(UnderAllocation {
                    link: item.link.clone(),
                    owner: item.owner_name.clone(),
                    price: item.price,
                    placed: split.placed_total(),
                    dropped: split.dropped,
                    policy: Policy::OversizedSplit,
                });
            }
        } else if item.is_child_source {
            out.counts.child += 1;
            match reassign_child(&item, &mut out.assigned, rng) {
                Some(target) => note_over_budget(&mut out, &target, &item, max_price, Policy::ChildReassign),
                None => {
                    tracing::warn!(link = %item.link, owner = %item.owner_name, "no recipient for child link");
                    out.under_allocations.push(UnderAllocation {
                        link: item.link.clone(),
                        owner: item.owner_name.clone(),
                        price: item.price,
                        placed: 0,
                        dropped: item.price,
                        policy: Policy::ChildReassign,
                    });
                }
            }
        } else {
            out.counts.standard += 1;
            if let StandardPlacement::OwnerFallback(owner) =
                assign_standard(&item, &mut out.assigned, max_price, params.link_count_weight)
            {
                out.counts.owner_fallback += 1;
                note_over_budget(&mut out, &owner, &item, max_price, Policy::StandardAssign);
            }
        }
    }

    tracing::info!(
        recipients = out.assigned.len(),
        oversized = out.counts.oversized,
        child = out.counts.child,
        standard = out.counts.standard,
        owner_fallback = out.counts.owner_fallback,
        "allocation finished"
    );
    out
}

fn note_over_budget(out: &mut AllocationOutcome, recipient: &str, item: &LinkRecord, max_price: u64, policy: Policy) {
    let total_after = out.assigned.total(recipient);
    if total_after > max_price {
        tracing::warn!(recipient, link = %item.link, total_after, max_price, ?policy, "recipient over budget");
        out.over_budget.push(OverBudget {
            recipient: recipient.to_string(),
            link: item.link.clone(),
            total_after,
            policy,
        });
    }
}
