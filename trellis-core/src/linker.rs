//! Level linking: turning implicit set containment into explicit edges.
//!
//! Every cluster at every level receives a synthetic id from a counter that
//! starts above the maximum original id, so real nodes and cluster nodes
//! can never collide. Finest-level clusters link to their original members;
//! each coarser level links to the level below by first-superset scan. In
//! hierarchy mode exactly one synthetic super-root is added above the top
//! level so traversal always has a single starting point; flat mode emits
//! the leaf edges alone.

use crate::error::TrellisError;
use crate::partition::{NodeId, Partition};

/// An ordered parent/child containment pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HierarchyEdge {
    pub(crate) parent: NodeId,
    pub(crate) child: NodeId,
}

/// The fully linked edge set for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkedHierarchy {
    pub(crate) edges: Vec<HierarchyEdge>,
    /// The synthetic anchor above the top level; `None` in flat mode.
    pub(crate) super_root: Option<NodeId>,
}

/// First synthetic id: one past the largest member id seen anywhere.
fn next_free_id<'a>(levels: impl Iterator<Item = &'a Partition>) -> u64 {
    levels
        .filter_map(Partition::max_member)
        .max()
        .map_or(0, |id| id.get() + 1)
}

fn push_leaf_edges(edges: &mut Vec<HierarchyEdge>, partition: &Partition, ids: &[NodeId]) {
    for (cluster, &id) in partition.clusters().iter().zip(ids) {
        for &member in cluster.members() {
            edges.push(HierarchyEdge {
                parent: id,
                child: member,
            });
        }
    }
}

fn allocate_ids(next: &mut u64, count: usize) -> Vec<NodeId> {
    let base = *next;
    *next += count as u64;
    (0..count as u64).map(|offset| NodeId::new(base + offset)).collect()
}

/// Links a single-level clustering: cluster-to-member edges only.
pub(crate) fn link_flat(partition: &Partition) -> LinkedHierarchy {
    let mut next = next_free_id(std::iter::once(partition));
    let ids = allocate_ids(&mut next, partition.clusters().len());
    let mut edges = Vec::new();
    push_leaf_edges(&mut edges, partition, &ids);
    LinkedHierarchy {
        edges,
        super_root: None,
    }
}

/// Links a finest-to-coarsest level sequence under one super-root.
///
/// # Errors
/// Returns [`TrellisError::BrokenNesting`] when a cluster has no superset
/// at the next level — the optimizer's nesting precondition is violated and
/// the encoder does not repair it.
pub(crate) fn link_levels(levels: &[Partition]) -> Result<LinkedHierarchy, TrellisError> {
    let mut next = next_free_id(levels.iter());
    let mut edges = Vec::new();
    let mut below: Option<(usize, Vec<NodeId>, &Partition)> = None;

    for (level_idx, level) in levels.iter().enumerate() {
        let ids = allocate_ids(&mut next, level.clusters().len());
        match below.take() {
            None => push_leaf_edges(&mut edges, level, &ids),
            Some((below_idx, below_ids, below_level)) => {
                for (cluster_idx, (lower, &lower_id)) in
                    below_level.clusters().iter().zip(&below_ids).enumerate()
                {
                    // First superset in sorted order, as the optimizer's
                    // strict nesting makes any superset unique in practice.
                    let position = level
                        .clusters()
                        .iter()
                        .position(|upper| upper.contains_all(lower))
                        .ok_or(TrellisError::BrokenNesting {
                            level: below_idx,
                            cluster: cluster_idx,
                        })?;
                    edges.push(HierarchyEdge {
                        parent: ids[position],
                        child: lower_id,
                    });
                }
            }
        }
        below = Some((level_idx, ids, level));
    }

    let Some((_, top_ids, _)) = below else {
        return Err(TrellisError::EmptyPartition { level: 0 });
    };
    let super_root = NodeId::new(next);
    for &top in &top_ids {
        edges.push(HierarchyEdge {
            parent: super_root,
            child: top,
        });
    }
    Ok(LinkedHierarchy {
        edges,
        super_root: Some(super_root),
    })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    fn partition(clusters: &[&[u64]]) -> Partition {
        let raw: Vec<Vec<NodeId>> = clusters.iter().map(|members| ids(members)).collect();
        Partition::normalize(&raw, NonZeroUsize::new(2).expect("non-zero"), 0)
            .expect("fixture clusters survive normalization")
    }

    fn pairs(linked: &LinkedHierarchy) -> Vec<(u64, u64)> {
        linked
            .edges
            .iter()
            .map(|edge| (edge.parent.get(), edge.child.get()))
            .collect()
    }

    #[test]
    fn flat_linking_allocates_ids_above_the_member_range() {
        let linked = link_flat(&partition(&[&[1, 2, 3], &[4, 5]]));
        assert_eq!(
            pairs(&linked),
            vec![(6, 1), (6, 2), (6, 3), (7, 4), (7, 5)],
        );
        assert_eq!(linked.super_root, None);
    }

    #[test]
    fn level_linking_adds_containment_edges_and_one_super_root() {
        let levels = vec![
            partition(&[&[1, 2], &[3, 4]]),
            partition(&[&[1, 2, 3, 4]]),
        ];
        let linked = link_levels(&levels).expect("levels are nested");
        assert_eq!(
            pairs(&linked),
            vec![(5, 1), (5, 2), (6, 3), (6, 4), (7, 5), (7, 6), (8, 7)],
        );
        assert_eq!(linked.super_root, Some(NodeId::new(8)));
    }

    #[test]
    fn id_counter_ignores_nodes_present_only_at_coarse_levels() {
        // Node 9 appears only at the coarse level; synthetic ids must still
        // start above it.
        let levels = vec![
            partition(&[&[1, 2]]),
            partition(&[&[1, 2, 9]]),
        ];
        let linked = link_levels(&levels).expect("levels are nested");
        assert_eq!(pairs(&linked), vec![(10, 1), (10, 2), (11, 10), (12, 11)]);
    }

    #[test]
    fn orphaned_cluster_reports_broken_nesting() {
        let levels = vec![
            partition(&[&[1, 2], &[3, 4]]),
            partition(&[&[1, 3]]),
        ];
        let err = link_levels(&levels).expect_err("no superset exists");
        assert_eq!(
            err,
            TrellisError::BrokenNesting {
                level: 0,
                cluster: 0,
            },
        );
    }

    #[test]
    fn ties_between_supersets_pick_the_first_in_sorted_order() {
        // Overlap mode can produce duplicate supersets; the scan takes the
        // first one in the level's sorted order.
        let levels = vec![
            partition(&[&[1, 2]]),
            partition(&[&[1, 2, 3], &[1, 2]]),
        ];
        let linked = link_levels(&levels).expect("a superset exists");
        // Level-0 cluster gets id 4; level-1 ids are 5 (the triple) and 6.
        assert!(pairs(&linked).contains(&(5, 4)));
    }
}
