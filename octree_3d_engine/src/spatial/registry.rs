/// NodeRegistry: partition of all nodes into "empty" and "in-use".
///
/// Derived state: a node is in-use iff its occupant set is non-empty. The
/// index keeps it up to date on every attach/detach so debug rendering (and
/// any consumer that only cares about occupied regions) never has to scan
/// the whole tree.

use rustc_hash::FxHashSet;
use super::node::NodeKey;

/// The two node buckets plus a transition counter.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    empty: FxHashSet<NodeKey>,
    in_use: FxHashSet<NodeKey>,
    /// Number of bucket moves since creation
    transitions: u64,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly built node. New nodes have no occupants.
    pub(super) fn register(&mut self, key: NodeKey) {
        self.empty.insert(key);
    }

    /// Move a node from "empty" to "in-use". No-op if already in use.
    pub(super) fn mark_in_use(&mut self, key: NodeKey) {
        if self.in_use.insert(key) {
            self.empty.remove(&key);
            self.transitions += 1;
        }
    }

    /// Move a node from "in-use" back to "empty". No-op if already empty.
    pub(super) fn mark_empty(&mut self, key: NodeKey) {
        if self.empty.insert(key) {
            self.in_use.remove(&key);
            self.transitions += 1;
        }
    }

    pub fn is_in_use(&self, key: NodeKey) -> bool {
        self.in_use.contains(&key)
    }

    pub fn is_empty_node(&self, key: NodeKey) -> bool {
        self.empty.contains(&key)
    }

    /// Nodes without occupants (arbitrary order).
    pub fn empty_nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.empty.iter().copied()
    }

    /// Nodes with at least one occupant (arbitrary order).
    pub fn in_use_nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.in_use.iter().copied()
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Total registered nodes (both buckets).
    pub fn len(&self) -> usize {
        self.empty.len() + self.in_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of empty <-> in-use moves performed so far.
    ///
    /// Stays constant across an update in which no body changed node.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
