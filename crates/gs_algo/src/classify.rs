//! Classification & normalization of raw records.
//!
//! - Prices are normalized via `gs_core::price`; malformed rows are skipped
//!   (kept in `skipped` so the boundary can report or reject them).
//! - A name containing the child marker (case-insensitive) makes its rows
//!   child-source links and puts the name in the exclusion set.
//! - Every other name seen in the input is a recipient, even if all of its
//!   rows were skipped.

use std::collections::BTreeSet;

use gs_core::{
    price::{parse_price_opt, PriceError},
    Assignment, LinkRecord, RawRecord,
};

/// A raw row dropped during classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 0-based position in the input sequence.
    pub index: usize,
    pub name: String,
    pub link: String,
    pub reason: PriceError,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classified {
    /// Links in input order.
    pub links: Vec<LinkRecord>,
    /// Child-source names.
    pub excluded: BTreeSet<String>,
    /// Every input name not in `excluded`.
    pub recipients: BTreeSet<String>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn is_child_source(name: &str, child_marker: &str) -> bool {
    name.to_lowercase().contains(&child_marker.to_lowercase())
}

pub fn classify(records: &[RawRecord], child_marker: &str) -> Classified {
    let mut out = Classified::default();

    for (index, rec) in records.iter().enumerate() {
        let is_child = is_child_source(&rec.name, child_marker);
        if is_child {
            out.excluded.insert(rec.name.clone());
        } else {
            out.recipients.insert(rec.name.clone());
        }

        match parse_price_opt(rec.price.as_ref()) {
            Ok(price) => out.links.push(LinkRecord {
                owner_name: rec.name.clone(),
                link: rec.link.clone(),
                price,
                is_child_source: is_child,
            }),
            Err(reason) => {
                tracing::debug!(index, name = %rec.name, %reason, "skipping record");
                out.skipped.push(SkippedRecord {
                    index,
                    name: rec.name.clone(),
                    link: rec.link.clone(),
                    reason,
                });
            }
        }
    }

    out
}

/// Give every recipient a (possibly empty) slot before allocation starts.
pub fn reserve_recipients(classified: &Classified, assigned: &mut Assignment) {
    for name in &classified.recipients {
        assigned.reserve(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::RawPrice;

    fn rec(name: &str, link: &str, price: RawPrice) -> RawRecord {
        RawRecord { name: name.into(), link: link.into(), price: Some(price) }
    }

    #[test]
    fn child_marker_is_case_insensitive() {
        assert!(is_child_source("dziecko: Jan", "dziecko:"));
        assert!(is_child_source("Dziecko: Ola", "dziecko:"));
        assert!(is_child_source("ciocia (DZIECKO: Ala)", "dziecko:"));
        assert!(!is_child_source("Dziecko Jan", "dziecko:"));
    }

    #[test]
    fn splits_children_from_recipients() {
        let input = vec![
            rec("Anna", "a", RawPrice::Int(100)),
            rec("dziecko: Jan", "x", RawPrice::Int(50)),
            rec("Tomasz", "t", "250 zł".into()),
        ];
        let c = classify(&input, "dziecko:");
        assert_eq!(c.links.len(), 3);
        assert!(c.excluded.contains("dziecko: Jan"));
        assert_eq!(
            c.recipients.iter().map(String::as_str).collect::<Vec<_>>(),
            ["Anna", "Tomasz"]
        );
        assert!(c.links[1].is_child_source);
        assert_eq!(c.links[2].price, 250);
    }

    #[test]
    fn malformed_price_skipped_but_name_kept() {
        let input = vec![
            rec("Marek", "m", "dużo".into()),
            RawRecord { name: "Ola".into(), link: "o".into(), price: None },
        ];
        let c = classify(&input, "dziecko:");
        assert!(c.links.is_empty());
        assert_eq!(c.skipped.len(), 2);
        assert_eq!(c.skipped[0].index, 0);
        assert_eq!(c.skipped[1].reason, PriceError::Missing);

        let mut a = Assignment::new();
        reserve_recipients(&c, &mut a);
        assert!(a.contains("Marek") && a.contains("Ola"));
        assert_eq!(a.total("Marek"), 0);
    }
}
