//! Greedy local-moving phase.
//!
//! Nodes are visited in a seeded shuffle order; each node joins the
//! neighboring community with the best positive gain, iterating until a
//! full pass makes no move. Candidate communities are scanned in ascending
//! id order so equal gains resolve identically from run to run.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use trellis_graph::CommunityGraph;

use crate::quality::{MoveContext, Quality};

/// Running per-community aggregates for one local-moving phase.
struct CommunityState {
    out_strength: Vec<f64>,
    in_strength: Vec<f64>,
    size: Vec<usize>,
}

impl CommunityState {
    fn new(graph: &CommunityGraph, node_sizes: &[usize], labels: &[usize]) -> Self {
        let slots = graph.node_count();
        let mut state = Self {
            out_strength: vec![0.0; slots],
            in_strength: vec![0.0; slots],
            size: vec![0; slots],
        };
        for (node, &community) in labels.iter().enumerate() {
            state.attach(graph, node_sizes, node, community);
        }
        state
    }

    fn attach(
        &mut self,
        graph: &CommunityGraph,
        node_sizes: &[usize],
        node: usize,
        community: usize,
    ) {
        self.out_strength[community] += graph.out_strength(node);
        self.in_strength[community] += graph.in_strength(node);
        self.size[community] += node_sizes.get(node).copied().unwrap_or(1);
    }

    fn detach(
        &mut self,
        graph: &CommunityGraph,
        node_sizes: &[usize],
        node: usize,
        community: usize,
    ) {
        self.out_strength[community] -= graph.out_strength(node);
        self.in_strength[community] -= graph.in_strength(node);
        self.size[community] -= node_sizes.get(node).copied().unwrap_or(1);
    }

    fn context(
        &self,
        graph: &CommunityGraph,
        node_sizes: &[usize],
        node: usize,
        community: usize,
        weight_to_comm: f64,
    ) -> MoveContext {
        MoveContext {
            weight_to_comm,
            node_out: graph.out_strength(node),
            node_in: graph.in_strength(node),
            comm_out: self.out_strength[community],
            comm_in: self.in_strength[community],
            node_size: node_sizes.get(node).copied().unwrap_or(1),
            comm_size: self.size[community],
        }
    }
}

/// Runs local moving to a fixed point, returning the number of moves made.
///
/// `node_sizes` carries the original node count behind each (super)node so
/// size-based null models keep working on aggregated graphs.
pub(crate) fn local_move(
    graph: &CommunityGraph,
    node_sizes: &[usize],
    labels: &mut [usize],
    quality: &Quality,
    rng: &mut StdRng,
) -> usize {
    let mut state = CommunityState::new(graph, node_sizes, labels);

    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.shuffle(rng);

    let mut moves = 0;
    let mut improved = true;
    while improved {
        improved = false;
        for &node in &order {
            let current = labels[node];
            state.detach(graph, node_sizes, node, current);

            let mut link_weights: HashMap<usize, f64> = HashMap::new();
            for &(neighbor, weight) in graph.links(node) {
                *link_weights.entry(labels[neighbor]).or_insert(0.0) += weight;
            }

            let stay_weight = link_weights.get(&current).copied().unwrap_or(0.0);
            let mut best_community = current;
            let mut best_gain = quality.gain(
                graph,
                &state.context(graph, node_sizes, node, current, stay_weight),
            );

            let mut candidates: Vec<(usize, f64)> = link_weights.into_iter().collect();
            candidates.sort_unstable_by_key(|&(community, _)| community);
            for (community, weight_to_comm) in candidates {
                if community == current {
                    continue;
                }
                let gain = quality.gain(
                    graph,
                    &state.context(graph, node_sizes, node, community, weight_to_comm),
                );
                if gain > best_gain {
                    best_gain = gain;
                    best_community = community;
                }
            }

            state.attach(graph, node_sizes, node, best_community);
            if best_community != current {
                labels[node] = best_community;
                moves += 1;
                improved = true;
            }
        }
    }
    moves
}
