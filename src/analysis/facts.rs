//! Pre/post flow-fact stores keyed by node identity.
//!
//! A node's pre-set is installed before its subtree is visited, its post-set
//! after; adding to an existing entry merges (pairs not already present are
//! added, existing pairs keep their point). Querying a node with no entry
//! yields the empty set.

use std::collections::HashMap;

use crate::analysis::reaching::ReachingDefs;
use crate::tree::NodeId;

#[derive(Debug, Default)]
pub struct FlowFacts {
    pre: HashMap<NodeId, ReachingDefs>,
    post: HashMap<NodeId, ReachingDefs>,
    empty: ReachingDefs,
}

impl FlowFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre(&self, node: NodeId) -> &ReachingDefs {
        self.pre.get(&node).unwrap_or(&self.empty)
    }

    pub fn post(&self, node: NodeId) -> &ReachingDefs {
        self.post.get(&node).unwrap_or(&self.empty)
    }

    pub fn has_pre(&self, node: NodeId) -> bool {
        self.pre.contains_key(&node)
    }

    pub fn has_post(&self, node: NodeId) -> bool {
        self.post.contains_key(&node)
    }

    pub fn add_pre(&mut self, node: NodeId, rds: ReachingDefs) {
        add(&mut self.pre, node, rds);
    }

    pub fn add_post(&mut self, node: NodeId, rds: ReachingDefs) {
        add(&mut self.post, node, rds);
    }

    /// Install a branch seed: only takes effect when the node has no pre-set
    /// yet. The traversal driver leaves a seeded pre-set alone instead of
    /// merging the dynamic predecessor in, which keeps one branch's facts
    /// from leaking into a sibling branch.
    pub fn seed_pre(&mut self, node: NodeId, rds: ReachingDefs) {
        self.pre.entry(node).or_insert(rds);
    }
}

fn add(map: &mut HashMap<NodeId, ReachingDefs>, node: NodeId, rds: ReachingDefs) {
    match map.entry(node) {
        std::collections::hash_map::Entry::Occupied(mut entry) => {
            entry.get_mut().merge_absent(&rds);
        }
        std::collections::hash_map::Entry::Vacant(entry) => {
            entry.insert(rds);
        }
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_facts.rs"]
mod tests;
