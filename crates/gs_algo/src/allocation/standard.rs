//! Standard placement for links within budget.
//!
//! Candidates are recipients with `total + price <= max_price`; the winner
//! minimizes `total + link_count * link_count_weight`, ties by name. With no
//! candidate the link goes back to its owner, budget or not.

use gs_core::{Assignment, LinkRecord, Portion};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StandardPlacement {
    /// Placed within budget.
    Fitted(String),
    /// Nobody had room; placed with the owner.
    OwnerFallback(String),
}

impl StandardPlacement {
    pub fn recipient(&self) -> &str {
        match self {
            StandardPlacement::Fitted(n) | StandardPlacement::OwnerFallback(n) => n,
        }
    }
}

pub fn assign_standard(
    link: &LinkRecord,
    assigned: &mut Assignment,
    max_price: u64,
    link_count_weight: u64,
) -> StandardPlacement {
    let best = assigned
        .iter()
        .filter_map(|(name, portions)| {
            let total = portions.iter().fold(0u64, |acc, p| acc.saturating_add(p.price));
            let fits = total.checked_add(link.price).is_some_and(|t| t <= max_price);
            fits.then(|| {
                let score = total.saturating_add((portions.len() as u64).saturating_mul(link_count_weight));
                (score, name.to_string())
            })
        })
        .min();

    let placement = match best {
        Some((score, name)) => {
            tracing::debug!(link = %link.link, recipient = %name, score, "standard placement");
            StandardPlacement::Fitted(name)
        }
        None => {
            tracing::debug!(link = %link.link, owner = %link.owner_name, "no room; owner fallback");
            StandardPlacement::OwnerFallback(link.owner_name.clone())
        }
    };

    assigned.push(placement.recipient(), Portion::new(link.link.clone(), link.price));
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(owner: &str, price: u64) -> LinkRecord {
        LinkRecord { owner_name: owner.into(), link: format!("l-{owner}-{price}"), price, is_child_source: false }
    }

    #[test]
    fn empty_recipients_tie_breaks_by_name() {
        let mut a = Assignment::new();
        a.reserve("Tomasz");
        a.reserve("Anna");
        let p = assign_standard(&link("Tomasz", 100), &mut a, 600, 10);
        assert_eq!(p, StandardPlacement::Fitted("Anna".into()));
    }

    #[test]
    fn link_count_penalty_beats_lower_total() {
        // Anna: 3 small links (30 + 3*10 = 60); Jan: one link of 50 (50 + 10 = 60); Ola: 55 (65).
        let mut a = Assignment::new();
        for _ in 0..3 {
            a.push("Anna", Portion::new("s", 10));
        }
        a.push("Jan", Portion::new("m", 50));
        a.push("Ola", Portion::new("n", 55));
        a.push("Zenon", Portion::new("k", 20));
        a.push("Zenon", Portion::new("k2", 20));
        a.push("Zenon", Portion::new("k3", 20));
        a.push("Zenon", Portion::new("k4", 20));

        let p = assign_standard(&link("Ola", 100), &mut a, 600, 10);
        // Anna and Jan tie at 60; Anna wins by name. Zenon: 80 + 40 = 120.
        assert_eq!(p.recipient(), "Anna");
    }

    #[test]
    fn respects_budget_ceiling() {
        let mut a = Assignment::new();
        a.push("Anna", Portion::new("a", 550));
        a.push("Jan", Portion::new("b", 560));
        a.reserve("Ola");
        a.push("Ola", Portion::new("c", 400));
        let p = assign_standard(&link("Jan", 100), &mut a, 600, 10);
        assert_eq!(p, StandardPlacement::Fitted("Ola".into()));
        assert_eq!(a.total("Ola"), 500);
    }

    #[test]
    fn exact_fit_is_allowed() {
        let mut a = Assignment::new();
        a.push("Anna", Portion::new("a", 500));
        let p = assign_standard(&link("Anna", 100), &mut a, 600, 10);
        assert_eq!(p, StandardPlacement::Fitted("Anna".into()));
        assert_eq!(a.total("Anna"), 600);
    }

    #[test]
    fn falls_back_to_owner_over_budget() {
        let mut a = Assignment::new();
        a.push("Anna", Portion::new("a", 590));
        a.push("Jan", Portion::new("b", 580));
        let p = assign_standard(&link("Jan", 300), &mut a, 600, 10);
        assert_eq!(p, StandardPlacement::OwnerFallback("Jan".into()));
        assert_eq!(a.total("Jan"), 880);
        assert_eq!(a.total("Anna"), 590);
    }
}
