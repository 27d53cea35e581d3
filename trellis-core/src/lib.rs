//! Trellis core library.
//!
//! Encodes a community clustering — flat or multi-level — as a compact DAG
//! of parent/child containment spans. Each hierarchy level is normalized
//! (deduplicated, size-filtered, deterministically ordered), linked into an
//! explicit edge set under globally unique synthetic cluster ids, and then
//! compressed by collapsing every maximal unbranching chain into a single
//! summary edge.
//!
//! Output order is reproducible: given the same input order, every stage
//! breaks ties the same way, so re-encoding a clustering yields
//! byte-identical records.

mod builder;
mod contig;
mod dag;
mod encode;
mod error;
mod linker;
mod partition;
mod trellis;

pub use crate::{
    builder::TrellisBuilder,
    contig::{EdgeKind, SummaryEdge},
    encode::render_records,
    error::{Result, TrellisError, TrellisErrorCode},
    partition::{Clustering, NodeId, RawPartition},
    trellis::Trellis,
};
