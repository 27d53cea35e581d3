//! Error types for graph loading.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while loading edge-list graphs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// File I/O failed while reading an input path.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input file contained no edges.
    #[error("`{path}` is an empty file")]
    Empty {
        /// Path of the empty input.
        path: PathBuf,
    },
    /// A row did not parse as two endpoints with an optional weight.
    #[error("`{path}` row {row} is not a valid edge record")]
    MalformedRecord {
        /// Path of the offending input.
        path: PathBuf,
        /// One-based row number of the offending record.
        row: usize,
    },
    /// A weighted row carried a negative weight.
    #[error("encountered a negative edge weight on row {row} of `{path}` ({line}) which is not allowed")]
    NegativeWeight {
        /// Path of the offending input.
        path: PathBuf,
        /// One-based row number of the offending record.
        row: usize,
        /// The raw offending line.
        line: String,
    },
    /// Input files mixed weighted and unweighted edge formats.
    #[error("all graphs should follow the same format")]
    MixedFormats,
}

impl GraphError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::Io { .. } => GraphErrorCode::Io,
            Self::Empty { .. } => GraphErrorCode::Empty,
            Self::MalformedRecord { .. } => GraphErrorCode::MalformedRecord,
            Self::NegativeWeight { .. } => GraphErrorCode::NegativeWeight,
            Self::MixedFormats => GraphErrorCode::MixedFormats,
        }
    }
}

/// Machine-readable error codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// File I/O failed.
    Io,
    /// The input file contained no edges.
    Empty,
    /// A row did not parse as an edge record.
    MalformedRecord,
    /// A weighted row carried a negative weight.
    NegativeWeight,
    /// Input files mixed weighted and unweighted formats.
    MixedFormats,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "GRAPH_IO",
            Self::Empty => "GRAPH_EMPTY_FILE",
            Self::MalformedRecord => "GRAPH_MALFORMED_RECORD",
            Self::NegativeWeight => "GRAPH_NEGATIVE_WEIGHT",
            Self::MixedFormats => "GRAPH_MIXED_FORMATS",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
