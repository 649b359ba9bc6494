//! Oversized-link splitting.
//!
//! Contract:
//! - Called for links whose price exceeds `max_price`.
//! - Recipients are visited least-loaded first: `(total, link_count)` ascending,
//!   then name ascending.
//! - Each recipient with free capacity gets `min(capacity, remaining)`.
//! - When capacity runs out, the leftover is returned in `dropped`; it is never
//!   silently placed over budget.

use gs_core::{Assignment, LinkRecord, Portion};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// `(recipient, portion)` in placement order.
    pub placed: Vec<(String, u64)>,
    /// Price left unplaced once capacity was exhausted.
    pub dropped: u64,
}

impl SplitOutcome {
    pub fn placed_total(&self) -> u64 {
        self.placed.iter().map(|(_, p)| *p).sum()
    }
}

pub fn split_oversized(link: &LinkRecord, assigned: &mut Assignment, max_price: u64) -> SplitOutcome {
    let mut order: Vec<(u64, usize, String)> = assigned
        .iter()
        .map(|(name, portions)| {
            let total = portions.iter().fold(0u64, |acc, p| acc.saturating_add(p.price));
            (total, portions.len(), name.to_string())
        })
        .collect();
    // Tuple order gives (total, count, name) ascending.
    order.sort();

    let mut remaining = link.price;
    let mut out = SplitOutcome::default();

    for (total, _, name) in order {
        if remaining == 0 {
            break;
        }
        let capacity = max_price.saturating_sub(total);
        if capacity == 0 {
            continue;
        }
        let portion = capacity.min(remaining);
        assigned.push(&name, Portion::new(link.link.clone(), portion));
        remaining -= portion;
        tracing::debug!(link = %link.link, recipient = %name, portion, remaining, "split portion");
        out.placed.push((name, portion));
    }

    out.dropped = remaining;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oversized(price: u64) -> LinkRecord {
        LinkRecord { owner_name: "Anna".into(), link: "big".into(), price, is_child_source: false }
    }

    fn with_recipients(names: &[&str]) -> Assignment {
        let mut a = Assignment::new();
        for n in names {
            a.reserve(n);
        }
        a
    }

    #[test]
    fn splits_700_into_two_portions() {
        let mut a = with_recipients(&["Anna", "Jan", "Tomasz"]);
        a.push("Jan", Portion::new("other", 200));

        let out = split_oversized(&oversized(700), &mut a, 600);
        assert_eq!(out.dropped, 0);
        assert_eq!(out.placed, vec![("Anna".to_string(), 600), ("Tomasz".to_string(), 100)]);
        assert_eq!(a.total("Jan"), 200);
    }

    #[test]
    fn tie_on_total_prefers_fewer_links() {
        let mut a = with_recipients(&["Anna", "Jan"]);
        a.push("Anna", Portion::new("p", 50));
        a.push("Anna", Portion::new("q", 50));
        a.push("Jan", Portion::new("r", 100));

        let out = split_oversized(&oversized(900), &mut a, 600);
        assert_eq!(out.placed[0], ("Jan".to_string(), 500));
        assert_eq!(out.placed[1], ("Anna".to_string(), 400));
    }

    #[test]
    fn full_recipients_are_skipped_and_leftover_reported() {
        let mut a = with_recipients(&["Anna", "Jan"]);
        a.push("Anna", Portion::new("p", 600));
        a.push("Jan", Portion::new("q", 450));

        let out = split_oversized(&oversized(1000), &mut a, 600);
        assert_eq!(out.placed, vec![("Jan".to_string(), 150)]);
        assert_eq!(out.dropped, 850);
        assert_eq!(out.placed_total() + out.dropped, 1000);
        assert_eq!(a.link_count("Anna"), 1);
    }

    #[test]
    fn no_recipients_drops_everything() {
        let mut a = Assignment::new();
        let out = split_oversized(&oversized(800), &mut a, 600);
        assert!(out.placed.is_empty());
        assert_eq!(out.dropped, 800);
        assert!(a.is_empty());
    }
}
