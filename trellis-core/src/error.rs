//! Error types for the trellis core library.
//!
//! Every failure mode of the encoder is a distinct variant with a stable
//! machine-readable code so callers can map outcomes to messages or exit
//! codes without string matching. The encoder performs no I/O and no
//! retries; none of these errors are transient.

use std::fmt;

use thiserror::Error;

/// Errors produced while configuring or running the hierarchy encoder.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TrellisError {
    /// Minimum cluster size must be greater than zero.
    #[error("min_cluster_size must be at least 1 (got {got})")]
    InvalidMinClusterSize {
        /// The invalid minimum cluster size supplied by the caller.
        got: usize,
    },
    /// A hierarchy level retained no clusters after normalization.
    ///
    /// Callers typically surface this as "no communities found" rather than
    /// treating it as fatal.
    #[error("level {level} has no clusters meeting the minimum size")]
    EmptyPartition {
        /// Index of the level that normalized to nothing, finest level first.
        level: usize,
    },
    /// A cluster is not contained in any cluster at the next coarser level.
    ///
    /// The optimizer is expected to produce strictly nested partitions; the
    /// encoder does not repair violations.
    #[error("cluster {cluster} at level {level} is not nested in any cluster at the next level")]
    BrokenNesting {
        /// Level of the orphaned cluster.
        level: usize,
        /// Index of the orphaned cluster within its sorted level.
        cluster: usize,
    },
    /// The edge set has no root to start traversal from.
    #[error("hierarchy edge set has no root")]
    NoRoot,
}

impl TrellisError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> TrellisErrorCode {
        match self {
            Self::InvalidMinClusterSize { .. } => TrellisErrorCode::InvalidMinClusterSize,
            Self::EmptyPartition { .. } => TrellisErrorCode::EmptyPartition,
            Self::BrokenNesting { .. } => TrellisErrorCode::BrokenNesting,
            Self::NoRoot => TrellisErrorCode::NoRoot,
        }
    }
}

/// Machine-readable error codes for [`TrellisError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TrellisErrorCode {
    /// The caller supplied a zero minimum cluster size.
    InvalidMinClusterSize,
    /// A hierarchy level retained no clusters after normalization.
    EmptyPartition,
    /// The input partitions are not properly nested.
    BrokenNesting,
    /// The edge set has no root.
    NoRoot,
}

impl TrellisErrorCode {
    /// Returns the symbolic identifier for logging and exit-code surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidMinClusterSize => "INVALID_MIN_CLUSTER_SIZE",
            Self::EmptyPartition => "EMPTY_PARTITION",
            Self::BrokenNesting => "BROKEN_NESTING",
            Self::NoRoot => "NO_ROOT",
        }
    }
}

impl fmt::Display for TrellisErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TrellisError>;
