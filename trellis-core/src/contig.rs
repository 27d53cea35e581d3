//! Contig compression: collapsing maximal unbranching chains.
//!
//! The traversal is a depth-first pre-order walk from each root in order.
//! A node is processed once per incoming edge it owns; children are only
//! expanded on the first visit. A node closes the running chain when it is
//! a leaf, has more than one child, or is being revisited through a later
//! incoming edge. A chain opened after a close begins with the parent
//! instance selected by the node's visit index, so the reported ancestor is
//! correct even when a node has several parents.

use std::collections::{HashMap, VecDeque};
use std::mem;

use crate::dag::Dag;
use crate::partition::NodeId;

/// Classification of a summary edge by its descendant end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The descendant is itself a cluster.
    ClusterToCluster,
    /// The descendant is an original graph node.
    ClusterToMember,
}

impl EdgeKind {
    /// Returns the wire tag used in serialized records.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ClusterToCluster => "c-c",
            Self::ClusterToMember => "c-m",
        }
    }
}

/// One compressed span of the hierarchy DAG.
///
/// # Examples
/// ```
/// use trellis_core::{EdgeKind, NodeId, SummaryEdge};
///
/// let edge = SummaryEdge::new(NodeId::new(6), NodeId::new(1), EdgeKind::ClusterToMember);
/// assert_eq!(edge.ancestor().get(), 6);
/// assert_eq!(edge.descendant().get(), 1);
/// assert_eq!(edge.kind().tag(), "c-m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryEdge {
    ancestor: NodeId,
    descendant: NodeId,
    kind: EdgeKind,
}

impl SummaryEdge {
    /// Creates a summary edge.
    #[must_use]
    pub const fn new(ancestor: NodeId, descendant: NodeId, kind: EdgeKind) -> Self {
        Self {
            ancestor,
            descendant,
            kind,
        }
    }

    /// The upper end of the compressed span.
    #[must_use]
    pub const fn ancestor(&self) -> NodeId {
        self.ancestor
    }

    /// The lower end of the compressed span.
    #[must_use]
    pub const fn descendant(&self) -> NodeId {
        self.descendant
    }

    /// Whether the descendant is a cluster or an original member.
    #[must_use]
    pub const fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// Collapses every maximal simple chain into one summary edge.
///
/// When `anchored` is set the first discovered chain is the span leaving
/// the synthetic super-root and is dropped — it anchors traversal and
/// carries no information about real structure. Chains that span no edge
/// (a bare root closing immediately) are never emitted; in flat mode every
/// cluster is such a root.
pub(crate) fn compress(dag: &Dag, anchored: bool) -> Vec<SummaryEdge> {
    let mut work: VecDeque<NodeId> = dag.roots().iter().copied().collect();
    let mut visits: HashMap<NodeId, usize> = HashMap::new();
    let mut chains: Vec<Vec<NodeId>> = Vec::new();
    let mut chain: Vec<NodeId> = Vec::new();

    while let Some(node) = work.pop_front() {
        let visit = visits.get(&node).copied().unwrap_or(0);
        if chain.is_empty() {
            // A fresh chain records the parent instance it was entered
            // through; roots have none and start bare.
            if let Some(&via) = dag.parents(node).get(visit) {
                chain.push(via);
            }
        }
        chain.push(node);

        let children = dag.children(node);
        if dag.is_leaf(node) || children.len() > 1 || visit > 0 {
            chains.push(mem::take(&mut chain));
        }
        if visit == 0 && !dag.is_leaf(node) {
            for &child in children.iter().rev() {
                work.push_front(child);
            }
        }
        *visits.entry(node).or_insert(0) += 1;
    }

    let skip = usize::from(anchored);
    let mut summaries = Vec::new();
    for span in chains.into_iter().skip(skip) {
        let &[first, .., last] = span.as_slice() else {
            continue;
        };
        let kind = if dag.is_leaf(last) {
            EdgeKind::ClusterToMember
        } else {
            EdgeKind::ClusterToCluster
        };
        summaries.push(SummaryEdge::new(first, last, kind));
    }
    summaries
}
