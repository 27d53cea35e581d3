//! Error types for the community optimizer.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigModel;

/// Errors surfaced before or during optimization.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    /// No input graphs were supplied.
    #[error("no input graphs to optimize")]
    EmptyInput,
    /// Hierarchical output cannot be combined with multiplex slices.
    #[error("hierarchical clustering is not supported with overlapping communities")]
    HierarchyWithOverlap,
    /// The constant Potts model is only defined for undirected graphs.
    #[error("graph for the CPM configuration model must be undirected")]
    CpmRequiresUndirected,
    /// Significance only supports unweighted graphs.
    #[error("the significance configuration model only supports unweighted graphs")]
    SignificanceRequiresUnweighted,
    /// The bundled optimizer does not implement this quality function.
    #[error("configuration model `{model}` is not supported by the bundled optimizer")]
    UnsupportedModel {
        /// The requested model.
        model: ConfigModel,
    },
}

impl DetectError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> DetectErrorCode {
        match self {
            Self::EmptyInput => DetectErrorCode::EmptyInput,
            Self::HierarchyWithOverlap => DetectErrorCode::HierarchyWithOverlap,
            Self::CpmRequiresUndirected => DetectErrorCode::CpmRequiresUndirected,
            Self::SignificanceRequiresUnweighted => DetectErrorCode::SignificanceRequiresUnweighted,
            Self::UnsupportedModel { .. } => DetectErrorCode::UnsupportedModel,
        }
    }
}

/// Machine-readable error codes for [`DetectError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DetectErrorCode {
    /// No input graphs were supplied.
    EmptyInput,
    /// Hierarchical output combined with multiplex slices.
    HierarchyWithOverlap,
    /// CPM on a directed graph.
    CpmRequiresUndirected,
    /// Significance on a weighted graph.
    SignificanceRequiresUnweighted,
    /// Quality function not implemented by the bundled optimizer.
    UnsupportedModel,
}

impl DetectErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "DETECT_EMPTY_INPUT",
            Self::HierarchyWithOverlap => "DETECT_HIERARCHY_WITH_OVERLAP",
            Self::CpmRequiresUndirected => "DETECT_CPM_REQUIRES_UNDIRECTED",
            Self::SignificanceRequiresUnweighted => "DETECT_SIGNIFICANCE_REQUIRES_UNWEIGHTED",
            Self::UnsupportedModel => "DETECT_UNSUPPORTED_MODEL",
        }
    }
}

impl fmt::Display for DetectErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
