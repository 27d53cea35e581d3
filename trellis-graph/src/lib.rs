//! Graph model and edge-list loading for trellis.
//!
//! Parses tab-delimited edge lists (two columns for unweighted graphs,
//! three for weighted) into an in-memory graph with deterministic vertex
//! numbering, ready for the community optimizer.

mod error;
mod graph;
mod loader;

pub use crate::{
    error::{GraphError, GraphErrorCode},
    graph::{CommunityGraph, GraphBuilder},
    loader::{load_graph, load_graphs},
};
