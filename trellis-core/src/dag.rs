//! Hierarchy DAG derived from the linked edge list.
//!
//! Adjacency is kept in both directions with edge insertion order
//! preserved, so traversal tie-breaks are reproducible from run to run
//! given the same input. Multiple parents per child are tolerated: strict
//! nesting makes them rare, but overlap mode produces them legitimately.

use std::collections::{HashMap, HashSet};

use crate::error::TrellisError;
use crate::linker::HierarchyEdge;
use crate::partition::NodeId;

/// Bidirectional containment adjacency with root/leaf classification.
#[derive(Debug, Clone)]
pub(crate) struct Dag {
    children: HashMap<NodeId, Vec<NodeId>>,
    parents: HashMap<NodeId, Vec<NodeId>>,
    /// Nodes with children but no parent, in first-appearance order.
    roots: Vec<NodeId>,
    /// Nodes with a parent but no children.
    leaves: HashSet<NodeId>,
}

impl Dag {
    /// Builds adjacency from the edge list.
    ///
    /// # Errors
    /// Returns [`TrellisError::NoRoot`] when no node qualifies as a root —
    /// the traversal would have nowhere to start.
    pub(crate) fn from_edges(edges: &[HierarchyEdge]) -> Result<Self, TrellisError> {
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut parents: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut parent_order: Vec<NodeId> = Vec::new();

        for edge in edges {
            let slot = children.entry(edge.parent).or_default();
            if slot.is_empty() {
                parent_order.push(edge.parent);
            }
            slot.push(edge.child);
            parents.entry(edge.child).or_default().push(edge.parent);
        }

        let roots: Vec<NodeId> = parent_order
            .into_iter()
            .filter(|node| !parents.contains_key(node))
            .collect();
        if roots.is_empty() {
            return Err(TrellisError::NoRoot);
        }

        let leaves: HashSet<NodeId> = parents
            .keys()
            .copied()
            .filter(|node| !children.contains_key(node))
            .collect();

        Ok(Self {
            children,
            parents,
            roots,
            leaves,
        })
    }

    pub(crate) fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(&node).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn parents(&self, node: NodeId) -> &[NodeId] {
        self.parents.get(&node).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub(crate) fn is_leaf(&self, node: NodeId) -> bool {
        self.leaves.contains(&node)
    }

    /// Total distinct nodes: every node either has children or is a leaf.
    pub(crate) fn node_count(&self) -> usize {
        self.children.len() + self.leaves.len()
    }
}
