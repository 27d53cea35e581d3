//! Core encoding orchestration.
//!
//! [`Trellis`] drives the pipeline: normalize each level, link the levels
//! into an explicit edge set, derive the DAG, and compress it into summary
//! edges. The whole run is synchronous and allocation-local; nothing is
//! shared across invocations.

use std::num::NonZeroUsize;

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    contig::{self, SummaryEdge},
    dag::Dag,
    error::TrellisError,
    linker,
    partition::{Clustering, Partition},
};

/// Entry point for encoding a clustering into summary edges.
///
/// # Examples
/// ```
/// use trellis_core::{Clustering, NodeId, TrellisBuilder};
///
/// let ids = |raw: &[u64]| raw.iter().copied().map(NodeId::new).collect::<Vec<_>>();
/// let clustering = Clustering::Flat(vec![ids(&[1, 2, 3]), ids(&[4, 5])]);
///
/// let trellis = TrellisBuilder::new().build().expect("default configuration is valid");
/// let edges = trellis.encode(&clustering).expect("clustering is well formed");
///
/// let mut rendered = Vec::new();
/// trellis_core::render_records(&edges, &mut rendered).expect("render to vec");
/// assert_eq!(
///     String::from_utf8(rendered).expect("records are ASCII"),
///     "6,1,c-m;6,2,c-m;6,3,c-m;7,4,c-m;7,5,c-m;",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Trellis {
    min_cluster_size: NonZeroUsize,
}

impl Trellis {
    pub(crate) const fn new(min_cluster_size: NonZeroUsize) -> Self {
        Self { min_cluster_size }
    }

    /// Returns the minimum cluster size configured for this instance.
    #[must_use]
    pub const fn min_cluster_size(&self) -> NonZeroUsize {
        self.min_cluster_size
    }

    /// Encodes `clustering` into an ordered list of summary edges.
    ///
    /// Given identical input order the output sequence is exactly
    /// reproducible: normalization sorts deterministically, linking assigns
    /// ids in that order, and traversal tie-breaks follow edge insertion
    /// order.
    ///
    /// # Errors
    /// Returns [`TrellisError::EmptyPartition`] when a level retains no
    /// clusters of the minimum size, [`TrellisError::BrokenNesting`] when a
    /// cluster has no containing cluster at the next level, and
    /// [`TrellisError::NoRoot`] when the linked edge set has no root.
    #[instrument(
        name = "core.encode",
        err,
        skip(self, clustering),
        fields(min_cluster_size = %self.min_cluster_size),
    )]
    pub fn encode(&self, clustering: &Clustering) -> Result<Vec<SummaryEdge>> {
        let linked = match clustering {
            Clustering::Flat(raw) => {
                let partition = Partition::normalize(raw, self.min_cluster_size, 0)?;
                linker::link_flat(&partition)
            }
            Clustering::Hierarchy(levels) => {
                if levels.is_empty() {
                    warn!("optimizer reported a hierarchy with no levels");
                    return Err(TrellisError::EmptyPartition { level: 0 });
                }
                let normalized = levels
                    .iter()
                    .enumerate()
                    .map(|(level, raw)| Partition::normalize(raw, self.min_cluster_size, level))
                    .collect::<Result<Vec<_>>>()?;
                linker::link_levels(&normalized)?
            }
        };

        let dag = Dag::from_edges(&linked.edges)?;
        debug!(
            edges = linked.edges.len(),
            nodes = dag.node_count(),
            anchored = linked.super_root.is_some(),
            "hierarchy linked"
        );
        Ok(contig::compress(&dag, linked.super_root.is_some()))
    }
}
