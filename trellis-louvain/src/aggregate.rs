//! Community aggregation between optimization rounds.

use trellis_graph::{CommunityGraph, GraphBuilder};

/// Renumbers arbitrary labels to `0..k` in first-seen order.
pub(crate) fn renumber(labels: &mut [usize]) -> usize {
    use std::collections::HashMap;

    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let mut next = 0usize;
    for label in labels.iter_mut() {
        let assigned = *mapping.entry(*label).or_insert_with(|| {
            let current = next;
            next += 1;
            current
        });
        *label = assigned;
    }
    next
}

/// Collapses communities into supernodes.
///
/// Intra-community weight becomes a self-loop, inter-community weights sum,
/// and each supernode inherits the original ids carried by its members.
/// `labels` must be renumbered to `0..community_count` beforehand.
pub(crate) fn aggregate(
    graph: &CommunityGraph,
    labels: &[usize],
    carriers: &[Vec<u64>],
    community_count: usize,
) -> (CommunityGraph, Vec<Vec<u64>>) {
    let mut builder = GraphBuilder::new(graph.is_directed(), true);
    for community in 0..community_count {
        builder.add_node(community as u64);
    }
    for &(source, target, weight) in graph.edges() {
        builder.add_edge(labels[source] as u64, labels[target] as u64, weight);
    }
    for node in 0..graph.node_count() {
        let loop_weight = graph.self_loop(node);
        if loop_weight > 0.0 {
            builder.add_edge(labels[node] as u64, labels[node] as u64, loop_weight);
        }
    }

    let mut merged: Vec<Vec<u64>> = vec![Vec::new(); community_count];
    for (node, &community) in labels.iter().enumerate() {
        if let Some(carried) = carriers.get(node) {
            merged[community].extend(carried.iter().copied());
        }
    }

    (builder.build(), merged)
}
