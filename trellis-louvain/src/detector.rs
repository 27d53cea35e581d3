//! Multilevel optimizer orchestration.
//!
//! Each round shuffles the visit order, runs local moving to a fixed
//! point, and aggregates communities into supernodes; rounds repeat until
//! a round makes no move. Flat mode returns the final partition,
//! hierarchical mode returns the partition recorded after every round,
//! finest first, always expressed in original node ids.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use trellis_core::{Clustering, NodeId, RawPartition};
use trellis_graph::CommunityGraph;

use crate::aggregate::{aggregate, renumber};
use crate::config::{ConfigModel, LouvainConfig};
use crate::error::DetectError;
use crate::local_move::local_move;
use crate::quality::Quality;

/// Slices used to approximate overlapping communities from one input.
const OVERLAP_SLICES: usize = 4;

/// The community optimizer.
///
/// # Examples
/// ```
/// use trellis_graph::GraphBuilder;
/// use trellis_louvain::{Louvain, LouvainConfig};
///
/// let mut builder = GraphBuilder::new(false, false);
/// for &(a, b) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
///     builder.add_edge(a, b, 1.0);
/// }
/// let graph = builder.build();
///
/// let louvain = Louvain::new(LouvainConfig {
///     resolution: 1.0,
///     seed: Some(7),
///     ..LouvainConfig::default()
/// });
/// let clustering = louvain.detect(&[graph]).expect("configuration is valid");
/// assert!(matches!(clustering, trellis_core::Clustering::Flat(_)));
/// ```
#[derive(Debug, Clone)]
pub struct Louvain {
    config: LouvainConfig,
}

impl Louvain {
    /// Creates an optimizer with the given configuration.
    #[must_use]
    pub const fn new(config: LouvainConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this optimizer runs with.
    #[must_use]
    pub const fn config(&self) -> &LouvainConfig {
        &self.config
    }

    /// Optimizes the input graphs into a clustering.
    ///
    /// A single graph yields a flat partition, or the full hierarchy when
    /// `deep` is set. Several graphs — or `overlap` on one graph — form
    /// multiplex slices that are optimized independently and merged into a
    /// possibly-overlapping flat partition.
    ///
    /// # Errors
    /// Returns [`DetectError::EmptyInput`] without graphs,
    /// [`DetectError::HierarchyWithOverlap`] when `deep` is combined with
    /// multiplex slices, the constraint errors for CPM on directed and
    /// Significance on weighted graphs, and
    /// [`DetectError::UnsupportedModel`] for objectives the bundled
    /// optimizer does not implement.
    #[instrument(
        name = "detect.run",
        err,
        skip(self, graphs),
        fields(
            model = %self.config.model,
            resolution = self.config.resolution,
            deep = self.config.deep,
            overlap = self.config.overlap,
            slices = graphs.len(),
        ),
    )]
    pub fn detect(&self, graphs: &[CommunityGraph]) -> Result<Clustering, DetectError> {
        let Some(primary) = graphs.first() else {
            return Err(DetectError::EmptyInput);
        };
        self.validate(graphs)?;

        if self.config.deep {
            let levels = self.levels(primary, 0)?;
            info!(levels = levels.len(), "hierarchical optimization finished");
            return Ok(Clustering::Hierarchy(levels));
        }

        let multiplex = self.config.overlap || graphs.len() > 1;
        let partition = if multiplex {
            self.multiplex_partition(graphs)?
        } else {
            self.flat_partition(primary)?
        };
        info!(clusters = partition.len(), "flat optimization finished");
        Ok(Clustering::Flat(partition))
    }

    fn validate(&self, graphs: &[CommunityGraph]) -> Result<(), DetectError> {
        let multiplex = self.config.overlap || graphs.len() > 1;
        if self.config.deep && multiplex {
            return Err(DetectError::HierarchyWithOverlap);
        }
        if self.config.model == ConfigModel::Cpm
            && graphs.iter().any(CommunityGraph::is_directed)
        {
            return Err(DetectError::CpmRequiresUndirected);
        }
        if self.config.model == ConfigModel::Significance
            && graphs.iter().any(CommunityGraph::is_weighted)
        {
            return Err(DetectError::SignificanceRequiresUnweighted);
        }
        Ok(())
    }

    fn rng(&self, offset: u64) -> StdRng {
        self.config.seed.map_or_else(StdRng::from_entropy, |seed| {
            StdRng::seed_from_u64(seed.wrapping_add(offset))
        })
    }

    /// Runs move/aggregate rounds, recording the partition after each one.
    fn levels(
        &self,
        graph: &CommunityGraph,
        seed_offset: u64,
    ) -> Result<Vec<RawPartition>, DetectError> {
        let quality = Quality::for_model(self.config.model, self.config.resolution, graph)
            .ok_or(DetectError::UnsupportedModel {
                model: self.config.model,
            })?;
        let mut rng = self.rng(seed_offset);

        let mut work = graph.clone();
        let mut carriers: Vec<Vec<u64>> = (0..work.node_count())
            .map(|node| work.original_id(node).map_or_else(Vec::new, |id| vec![id]))
            .collect();
        let mut levels: Vec<RawPartition> = Vec::new();

        loop {
            let node_sizes: Vec<usize> = carriers.iter().map(Vec::len).collect();
            let mut labels: Vec<usize> = (0..work.node_count()).collect();
            let moves = local_move(&work, &node_sizes, &mut labels, &quality, &mut rng);
            if moves == 0 {
                break;
            }
            let communities = renumber(&mut labels);
            let (coarse, merged) = aggregate(&work, &labels, &carriers, communities);
            levels.push(to_partition(&merged));
            debug!(
                round = levels.len(),
                communities, moves, "aggregation round complete"
            );
            work = coarse;
            carriers = merged;
        }
        Ok(levels)
    }

    fn flat_partition(&self, graph: &CommunityGraph) -> Result<RawPartition, DetectError> {
        let mut levels = self.levels(graph, 0)?;
        Ok(levels
            .pop()
            .unwrap_or_else(|| singleton_partition(graph)))
    }

    /// Optimizes each slice independently and merges the slice partitions,
    /// deduplicating identical member sets.
    fn multiplex_partition(
        &self,
        graphs: &[CommunityGraph],
    ) -> Result<RawPartition, DetectError> {
        let slices: Vec<&CommunityGraph> = if graphs.len() > 1 {
            graphs.iter().collect()
        } else {
            graphs.iter().cycle().take(OVERLAP_SLICES).collect()
        };

        let mut seen: HashSet<Vec<u64>> = HashSet::new();
        let mut merged: RawPartition = Vec::new();
        for (slice_idx, slice) in slices.into_iter().enumerate() {
            let partition = self
                .levels(slice, slice_idx as u64)?
                .pop()
                .unwrap_or_else(|| singleton_partition(slice));
            for members in partition {
                let mut key: Vec<u64> = members.iter().map(|id| id.get()).collect();
                key.sort_unstable();
                key.dedup();
                if seen.insert(key) {
                    merged.push(members);
                }
            }
        }
        Ok(merged)
    }
}

fn to_partition(carriers: &[Vec<u64>]) -> RawPartition {
    carriers
        .iter()
        .map(|members| members.iter().copied().map(NodeId::new).collect())
        .collect()
}

fn singleton_partition(graph: &CommunityGraph) -> RawPartition {
    (0..graph.node_count())
        .filter_map(|node| graph.original_id(node))
        .map(|id| vec![NodeId::new(id)])
        .collect()
}
