//! Cluster membership types and per-level partition normalization.
//!
//! The optimizer reports each hierarchy level as raw member lists in
//! original node ids. Normalization deduplicates members, drops clusters
//! below the configured minimum size, and orders the survivors by
//! descending size (ties in discovery order) so synthetic id assignment
//! downstream is deterministic given identical input order.

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::TrellisError;

/// Identifier for a node in the hierarchy DAG.
///
/// Either an original graph vertex id or a synthetic cluster id. Synthetic
/// ids are allocated above the maximum original id, so the two ranges never
/// collide and a single totally ordered type covers both.
///
/// # Examples
/// ```
/// use trellis_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw cluster membership for one hierarchy level, as reported by the
/// optimizer: one member list per community, in original node ids.
pub type RawPartition = Vec<Vec<NodeId>>;

/// A clustering reported by the community optimizer.
///
/// Hierarchy levels run finest to coarsest, and every level's clusters are
/// expressed in original node ids (coarse-graph memberships are resolved by
/// the optimizer before handoff).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clustering {
    /// A single partition with no hierarchy.
    Flat(RawPartition),
    /// An ordered sequence of partitions, finest first.
    Hierarchy(Vec<RawPartition>),
}

/// One community at one hierarchy level: deduplicated members in ascending
/// id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cluster {
    members: Vec<NodeId>,
}

impl Cluster {
    fn from_raw(raw: &[NodeId]) -> Self {
        let mut members = raw.to_vec();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    pub(crate) fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether every member of `other` is also a member of `self`.
    ///
    /// Both member lists are sorted, so this is a single merge pass.
    pub(crate) fn contains_all(&self, other: &Cluster) -> bool {
        let mut mine = self.members.iter().peekable();
        for needle in &other.members {
            loop {
                match mine.peek() {
                    Some(candidate) if *candidate < needle => {
                        mine.next();
                    }
                    Some(candidate) if *candidate == needle => {
                        mine.next();
                        break;
                    }
                    _ => return false,
                }
            }
        }
        true
    }

    pub(crate) fn max_member(&self) -> Option<NodeId> {
        self.members.last().copied()
    }
}

/// The normalized clusters of one hierarchy level, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Partition {
    clusters: Vec<Cluster>,
}

impl Partition {
    /// Normalizes one level of raw optimizer output.
    ///
    /// Members are deduplicated, clusters with fewer than
    /// `min_cluster_size` distinct members are dropped, and the survivors
    /// are ordered by descending size with ties in discovery order.
    pub(crate) fn normalize(
        raw: &[Vec<NodeId>],
        min_cluster_size: NonZeroUsize,
        level: usize,
    ) -> Result<Self, TrellisError> {
        let mut clusters: Vec<Cluster> = raw
            .iter()
            .map(|members| Cluster::from_raw(members))
            .filter(|cluster| cluster.len() >= min_cluster_size.get())
            .collect();
        if clusters.is_empty() {
            return Err(TrellisError::EmptyPartition { level });
        }
        // Stable sort: equal sizes keep the optimizer's discovery order.
        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        Ok(Self { clusters })
    }

    pub(crate) fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub(crate) fn max_member(&self) -> Option<NodeId> {
        self.clusters
            .iter()
            .filter_map(Cluster::max_member)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    fn min(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).expect("non-zero")
    }

    #[test]
    fn normalize_dedupes_and_sorts_members() {
        let partition = Partition::normalize(&[ids(&[3, 1, 3, 2])], min(2), 0)
            .expect("cluster survives normalization");
        assert_eq!(partition.clusters()[0].members(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn normalize_drops_undersized_clusters() {
        let partition = Partition::normalize(&[ids(&[7]), ids(&[1, 2]), ids(&[5, 5])], min(2), 0)
            .expect("one cluster survives");
        assert_eq!(partition.clusters().len(), 1);
        assert_eq!(partition.clusters()[0].members(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn normalize_orders_by_descending_size_with_stable_ties() {
        let partition = Partition::normalize(
            &[ids(&[1, 2]), ids(&[3, 4, 5]), ids(&[6, 7])],
            min(2),
            0,
        )
        .expect("all clusters survive");
        let sizes: Vec<usize> = partition.clusters().iter().map(Cluster::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);
        // The two size-2 clusters keep their discovery order.
        assert_eq!(partition.clusters()[1].members(), ids(&[1, 2]).as_slice());
        assert_eq!(partition.clusters()[2].members(), ids(&[6, 7]).as_slice());
    }

    #[test]
    fn normalize_signals_empty_partition_with_level() {
        let err = Partition::normalize(&[ids(&[1]), ids(&[2])], min(2), 3)
            .expect_err("no cluster meets the minimum size");
        assert_eq!(err, TrellisError::EmptyPartition { level: 3 });
    }

    #[test]
    fn contains_all_checks_subset_membership() {
        let big = Cluster::from_raw(&ids(&[1, 2, 3, 4]));
        let small = Cluster::from_raw(&ids(&[2, 4]));
        let other = Cluster::from_raw(&ids(&[4, 9]));
        assert!(big.contains_all(&small));
        assert!(big.contains_all(&big));
        assert!(!big.contains_all(&other));
        assert!(!small.contains_all(&big));
    }

    #[test]
    fn max_member_spans_the_whole_partition() {
        let partition = Partition::normalize(&[ids(&[1, 9]), ids(&[2, 3, 4])], min(2), 0)
            .expect("clusters survive");
        assert_eq!(partition.max_member(), Some(NodeId::new(9)));
    }
}
