//! Shared-link resolution and result assembly.
//!
//! Computed strictly from the final `Assignment`; nothing here mutates it.
//! A link string is shared when at least one *other* recipient holds an entry
//! with the identical string (split links, or two rows that carry the same URL).

use std::collections::{BTreeMap, BTreeSet};

use gs_core::{Assignment, ResultEntry, SharedLink};

/// link → recipients holding at least one entry for it.
#[derive(Clone, Debug, Default)]
pub struct HolderIndex {
    holders: BTreeMap<String, BTreeSet<String>>,
}

impl HolderIndex {
    pub fn build(assigned: &Assignment) -> Self {
        let mut holders: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (name, portions) in assigned.iter() {
            for p in portions {
                holders.entry(p.link.clone()).or_default().insert(name.to_string());
            }
        }
        Self { holders }
    }

    /// Other holders of `link`, ascending, excluding `name`.
    pub fn others(&self, link: &str, name: &str) -> Vec<String> {
        self.holders
            .get(link)
            .map(|set| set.iter().filter(|n| n.as_str() != name).cloned().collect())
            .unwrap_or_default()
    }
}

/// Shared map for one recipient: link → other holders. Links held by nobody
/// else are absent.
pub fn shared_links(name: &str, assigned: &Assignment) -> BTreeMap<String, Vec<String>> {
    let index = HolderIndex::build(assigned);
    assigned
        .portions(name)
        .iter()
        .filter_map(|p| {
            let others = index.others(&p.link, name);
            (!others.is_empty()).then(|| (p.link.clone(), others))
        })
        .collect()
}

/// One `ResultEntry` per recipient key, in name order.
pub fn build_entries(assigned: &Assignment) -> Vec<ResultEntry> {
    let index = HolderIndex::build(assigned);

    assigned
        .iter()
        .map(|(name, portions)| {
            let shared = portions
                .iter()
                .filter_map(|p| {
                    let shared_with = index.others(&p.link, name);
                    (!shared_with.is_empty()).then(|| SharedLink {
                        link: p.link.clone(),
                        price: p.price,
                        shared_with,
                    })
                })
                .collect();
            ResultEntry {
                name: name.to_string(),
                links: portions.to_vec(),
                shared,
                total: portions.iter().fold(0u64, |acc, p| acc.saturating_add(p.price)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::Portion;

    fn sample() -> Assignment {
        let mut a = Assignment::new();
        a.push("Anna", Portion::new("big", 600));
        a.push("Anna", Portion::new("solo", 20));
        a.push("Jan", Portion::new("big", 100));
        a.push("Ola", Portion::new("big", 50));
        a.reserve("Piotr");
        a
    }

    #[test]
    fn shared_map_lists_other_holders() {
        let a = sample();
        let m = shared_links("Anna", &a);
        assert_eq!(m.len(), 1);
        assert_eq!(m["big"], vec!["Jan".to_string(), "Ola".to_string()]);
        assert!(shared_links("Piotr", &a).is_empty());
    }

    #[test]
    fn entries_carry_totals_of_portions() {
        let entries = build_entries(&sample());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Anna", "Jan", "Ola", "Piotr"]);

        let anna = &entries[0];
        assert_eq!(anna.total, 620);
        assert_eq!(anna.shared.len(), 1);
        assert_eq!(anna.shared[0].price, 600);

        let piotr = &entries[3];
        assert!(piotr.links.is_empty() && piotr.shared.is_empty());
        assert_eq!(piotr.total, 0);
    }

    #[test]
    fn duplicate_link_within_one_bucket_is_not_shared() {
        let mut a = Assignment::new();
        a.push("Anna", Portion::new("u", 10));
        a.push("Anna", Portion::new("u", 15));
        let e = build_entries(&a);
        assert!(e[0].shared.is_empty());
        assert_eq!(e[0].total, 25);
    }

    #[test]
    fn sharing_is_symmetric() {
        let a = sample();
        for e in build_entries(&a) {
            for s in &e.shared {
                for other in &s.shared_with {
                    assert!(a.portions(other).iter().any(|p| p.link == s.link));
                    assert!(shared_links(other, &a)[&s.link].contains(&e.name));
                }
            }
        }
    }
}
