//! Domain entities: wire records, classified links, the assignment aggregate,
//! and the per-recipient result unit.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::price::RawPrice;

/// One input row. Field names follow the exported sheet (`Imię`, `Link`,
/// `Cena`) or their English equivalents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawRecord {
    #[cfg_attr(feature = "serde", serde(alias = "Imię"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(alias = "Link"))]
    pub link: String,
    #[cfg_attr(feature = "serde", serde(alias = "Cena", default))]
    pub price: Option<RawPrice>,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, link: impl Into<String>, price: impl Into<RawPrice>) -> Self {
        Self { name: name.into(), link: link.into(), price: Some(price.into()) }
    }
}

/// A classified link: normalized price plus the child-source flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkRecord {
    pub owner_name: String,
    pub link: String,
    pub price: u64,
    pub is_child_source: bool,
}

/// One entry in a recipient's bucket. For split links `price` is the portion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Portion {
    pub link: String,
    pub price: u64,
}

impl Portion {
    pub fn new(link: impl Into<String>, price: u64) -> Self {
        Self { link: link.into(), price }
    }
}

/// Recipient → ordered portions. The single mutable aggregate of a run;
/// policies receive it by `&mut` and nothing else holds it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    slots: BTreeMap<String, Vec<Portion>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `name` has a slot (possibly empty). Idempotent.
    pub fn reserve(&mut self, name: &str) {
        if !self.slots.contains_key(name) {
            self.slots.insert(name.to_string(), Vec::new());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Append a portion, creating the slot when absent.
    pub fn push(&mut self, name: &str, portion: Portion) {
        self.reserve(name);
        if let Some(slot) = self.slots.get_mut(name) {
            slot.push(portion);
        }
    }

    pub fn portions(&self, name: &str) -> &[Portion] {
        self.slots.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of portions currently held by `name` (saturating).
    pub fn total(&self, name: &str) -> u64 {
        self.portions(name)
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.price))
    }

    pub fn link_count(&self, name: &str) -> usize {
        self.portions(name).len()
    }

    /// `(total, link_count)` snapshot for one recipient.
    pub fn load(&self, name: &str) -> (u64, usize) {
        (self.total(name), self.link_count(name))
    }

    /// Recipient names in ascending order.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Portion])> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A portion that other recipients also hold (same link string).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharedLink {
    pub link: String,
    pub price: u64,
    pub shared_with: Vec<String>,
}

/// Externally visible per-recipient outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultEntry {
    pub name: String,
    pub links: Vec<Portion>,
    pub shared: Vec<SharedLink>,
    pub total: u64,
}
