//! Sets of reaching definitions: at most one definition point per item at a
//! given program point. Ordered by item so dumps and merges are
//! deterministic.

use std::collections::BTreeMap;

use crate::analysis::def_item::{DefItemArena, DefItemId};
use crate::analysis::def_point::DefPoint;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachingDefs {
    map: BTreeMap<DefItemId, DefPoint>,
}

impl ReachingDefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-replace: a new definition of `item` supersedes the old one.
    pub fn insert(&mut self, item: DefItemId, point: DefPoint) {
        self.map.insert(item, point);
    }

    /// Insert-if-absent: at a merge the earlier branch's point is preserved,
    /// keeping the chosen point stable for deterministic diagnostics.
    pub fn add_absent(&mut self, item: DefItemId, point: DefPoint) {
        self.map.entry(item).or_insert(point);
    }

    /// Add every pair of `other` that is not already present.
    pub fn merge_absent(&mut self, other: &ReachingDefs) {
        for (&item, &point) in &other.map {
            self.add_absent(item, point);
        }
    }

    pub fn has_item(&self, item: DefItemId) -> bool {
        self.map.contains_key(&item)
    }

    pub fn has_pair(&self, item: DefItemId, point: DefPoint) -> bool {
        self.map.get(&item) == Some(&point)
    }

    /// Meet: keep a pair iff both sets record it.
    pub fn intersect(&self, other: &ReachingDefs) -> ReachingDefs {
        let mut result = ReachingDefs::new();
        for (&item, &point) in &self.map {
            if other.has_pair(item, point) {
                result.insert(item, point);
            }
        }
        result
    }

    /// Join: keep a pair present in either set; on a conflicting point for
    /// the same item, `self`'s pair wins.
    pub fn union(&self, other: &ReachingDefs) -> ReachingDefs {
        let mut result = self.clone();
        result.merge_absent(other);
        result
    }

    /// Whether the two sets denote different mappings.
    pub fn differ(&self, other: &ReachingDefs) -> bool {
        self.map != other.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefItemId, DefPoint)> + '_ {
        self.map.iter().map(|(&item, &point)| (item, point))
    }

    pub fn render(&self, items: &DefItemArena) -> String {
        if self.map.is_empty() {
            return "<none>\n".to_string();
        }
        let mut out = String::new();
        for &item in self.map.keys() {
            out.push_str(&format!("RD for {}\n", items.item(item).name));
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_reaching.rs"]
mod tests;
