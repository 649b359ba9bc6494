//! Child-source reassignment: the whole link goes to a uniformly random
//! recipient other than its owner. The budget ceiling is not consulted here.

use gs_core::{AllocRng, Assignment, LinkRecord, Portion};

/// Place `link` with a random non-owner recipient and return that recipient,
/// or `None` when nobody else is available.
pub fn reassign_child(link: &LinkRecord, assigned: &mut Assignment, rng: &mut AllocRng) -> Option<String> {
    let candidates: Vec<String> = assigned
        .recipients()
        .filter(|name| *name != link.owner_name)
        .map(str::to_string)
        .collect();

    let idx = rng.choose_index(candidates.len())?;
    let target = candidates.into_iter().nth(idx)?;
    assigned.push(&target, Portion::new(link.link.clone(), link.price));
    tracing::debug!(link = %link.link, owner = %link.owner_name, recipient = %target, "child link reassigned");
    Some(target)
}
