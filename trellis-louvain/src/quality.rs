//! Node-move gain functions for the supported configuration models.
//!
//! Gains are computed up to a positive scale factor: local moving only
//! compares candidates for the same node, so constant multipliers cancel.

use trellis_graph::CommunityGraph;

use crate::config::ConfigModel;

/// A quality function with its null-model parameters resolved against the
/// input graph.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Quality {
    /// Configuration-model modularity (`Default` at resolution 1, `RB`
    /// at the caller's resolution).
    Newman { resolution: f64 },
    /// Erdős–Rényi null model: expected links scale with pair counts.
    ErdosRenyi { resolution: f64, density: f64 },
    /// Constant Potts model: penalty proportional to community size.
    ConstantPotts { resolution: f64 },
}

/// Aggregates describing one candidate move, with the moving node already
/// detached from every community.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MoveContext {
    /// Total arc weight between the node and the candidate community.
    pub(crate) weight_to_comm: f64,
    /// Weighted out-degree of the node.
    pub(crate) node_out: f64,
    /// Weighted in-degree of the node.
    pub(crate) node_in: f64,
    /// Sum of member out-strengths in the candidate community.
    pub(crate) comm_out: f64,
    /// Sum of member in-strengths in the candidate community.
    pub(crate) comm_in: f64,
    /// Original nodes carried by the moving (super)node.
    pub(crate) node_size: usize,
    /// Original nodes carried by the candidate community.
    pub(crate) comm_size: usize,
}

impl Quality {
    /// Resolves a model name into a gain function, or `None` when the
    /// bundled optimizer does not implement it.
    pub(crate) fn for_model(
        model: ConfigModel,
        resolution: f64,
        graph: &CommunityGraph,
    ) -> Option<Self> {
        match model {
            ConfigModel::Default => Some(Self::Newman { resolution: 1.0 }),
            ConfigModel::Rb => Some(Self::Newman { resolution }),
            ConfigModel::Rber => Some(Self::ErdosRenyi {
                resolution,
                density: pair_density(graph),
            }),
            ConfigModel::Cpm => Some(Self::ConstantPotts { resolution }),
            ConfigModel::Surprise | ConfigModel::Significance => None,
        }
    }

    /// Gain of moving the node into the candidate community.
    pub(crate) fn gain(&self, graph: &CommunityGraph, ctx: &MoveContext) -> f64 {
        let total = graph.total_weight();
        match *self {
            Self::Newman { resolution } => {
                if total <= 0.0 {
                    return ctx.weight_to_comm;
                }
                let null = if graph.is_directed() {
                    (ctx.node_out * ctx.comm_in + ctx.node_in * ctx.comm_out) / total
                } else {
                    ctx.node_out * ctx.comm_out / (2.0 * total)
                };
                ctx.weight_to_comm - resolution * null
            }
            Self::ErdosRenyi {
                resolution,
                density,
            } => {
                let pairs = (ctx.node_size * ctx.comm_size) as f64;
                ctx.weight_to_comm - resolution * density * pairs
            }
            Self::ConstantPotts { resolution } => {
                let pairs = (ctx.node_size * ctx.comm_size) as f64;
                ctx.weight_to_comm - resolution * pairs
            }
        }
    }
}

/// Edge weight per possible node pair of the input graph.
fn pair_density(graph: &CommunityGraph) -> f64 {
    let nodes = graph.node_count() as f64;
    if graph.node_count() < 2 {
        return 0.0;
    }
    let pairs = if graph.is_directed() {
        nodes * (nodes - 1.0)
    } else {
        nodes * (nodes - 1.0) / 2.0
    };
    graph.total_weight() / pairs
}
