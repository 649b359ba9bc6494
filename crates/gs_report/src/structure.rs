//! crates/gs_report/src/structure.rs
//! Document model for the structured result file. Field names are the
//! user-facing Polish keys; prices are pre-formatted as `"<n> zł"`.

use serde::{Deserialize, Serialize};

use gs_core::price::format_price;
use gs_core::ResultEntry;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDoc {
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Cena")]
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDoc {
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Cena")]
    pub price: String,
    #[serde(rename = "Współdzielone z")]
    pub shared_with: Vec<String>,
}

/// One recipient, in output key order: name, links, shared, total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientDoc {
    #[serde(rename = "Imię")]
    pub name: String,
    #[serde(rename = "Linki")]
    pub links: Vec<LinkDoc>,
    #[serde(rename = "Współdzielone")]
    pub shared: Vec<SharedDoc>,
    #[serde(rename = "Suma końcowa")]
    pub total: String,
}

impl From<&ResultEntry> for RecipientDoc {
    fn from(e: &ResultEntry) -> Self {
        RecipientDoc {
            name: e.name.clone(),
            links: e
                .links
                .iter()
                .map(|p| LinkDoc { link: p.link.clone(), price: format_price(p.price) })
                .collect(),
            shared: e
                .shared
                .iter()
                .map(|s| SharedDoc {
                    link: s.link.clone(),
                    price: format_price(s.price),
                    shared_with: s.shared_with.clone(),
                })
                .collect(),
            total: format_price(e.total),
        }
    }
}

pub fn map_entries(entries: &[ResultEntry]) -> Vec<RecipientDoc> {
    entries.iter().map(RecipientDoc::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::{Portion, SharedLink};

    #[test]
    fn maps_prices_to_display_strings() {
        let e = ResultEntry {
            name: "Anna".into(),
            links: vec![Portion::new("big", 600), Portion::new("book", 40)],
            shared: vec![SharedLink { link: "big".into(), price: 600, shared_with: vec!["Jan".into()] }],
            total: 640,
        };
        let doc = RecipientDoc::from(&e);
        assert_eq!(doc.links[0].price, "600 zł");
        assert_eq!(doc.shared[0].shared_with, vec!["Jan".to_string()]);
        assert_eq!(doc.total, "640 zł");
    }
}
