//! Louvain-style multilevel community detection for trellis.
//!
//! Implements the optimizer collaborator: seeded greedy local moving with
//! community aggregation, producing either one flat partition or the full
//! finest-to-coarsest hierarchy over a [`trellis_graph::CommunityGraph`].
//! Quality functions cover plain and resolution-scaled modularity, an
//! Erdős–Rényi null model, and the constant Potts model; the statistical
//! objectives remain on the configuration surface but are reported as
//! unsupported.

mod aggregate;
mod config;
mod detector;
mod error;
mod local_move;
mod quality;

pub use crate::{
    config::{ConfigModel, LouvainConfig},
    detector::Louvain,
    error::{DetectError, DetectErrorCode},
};
