//! Tab-delimited edge-list loading.
//!
//! The first data row of a file fixes its format: two columns mean an
//! unweighted graph, three mean a weighted one with a non-negative numeric
//! weight. When several files are loaded together they must all use the
//! same format.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{Span, field, info, instrument};

use crate::error::GraphError;
use crate::graph::{CommunityGraph, GraphBuilder};

/// Loads a single edge-list file.
///
/// # Errors
/// Returns [`GraphError::Io`] when the path cannot be read,
/// [`GraphError::Empty`] when it holds no edges,
/// [`GraphError::MalformedRecord`] for rows that do not parse, and
/// [`GraphError::NegativeWeight`] for weighted rows below zero.
#[instrument(name = "graph.load", err, skip(path), fields(path = field::Empty))]
pub fn load_graph(path: &Path, directed: bool) -> Result<CommunityGraph, GraphError> {
    Span::current().record("path", field::display(path.display()));

    let contents = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((first_row, first_line)) = rows.next() else {
        return Err(GraphError::Empty {
            path: path.to_path_buf(),
        });
    };

    let columns = first_line.split_whitespace().count();
    let weighted = match columns {
        2 => false,
        3 => true,
        _ => {
            return Err(GraphError::MalformedRecord {
                path: path.to_path_buf(),
                row: first_row,
            });
        }
    };

    let mut builder = GraphBuilder::new(directed, weighted);
    let mut edge_count = 0usize;
    for (row, line) in std::iter::once((first_row, first_line)).chain(rows) {
        let (source, target, weight) = parse_record(path, row, line, weighted)?;
        builder.add_edge(source, target, weight);
        edge_count += 1;
    }

    let graph = builder.build();
    info!(
        nodes = graph.node_count(),
        edges = edge_count,
        weighted,
        directed,
        "edge list loaded"
    );
    Ok(graph)
}

/// Loads every path in order, rejecting mixed weighted/unweighted formats.
///
/// # Errors
/// Propagates per-file loading errors and returns
/// [`GraphError::MixedFormats`] when the files disagree on weighting.
pub fn load_graphs(paths: &[PathBuf], directed: bool) -> Result<Vec<CommunityGraph>, GraphError> {
    let graphs = paths
        .iter()
        .map(|path| load_graph(path, directed))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(first) = graphs.first() {
        if graphs.iter().any(|g| g.is_weighted() != first.is_weighted()) {
            return Err(GraphError::MixedFormats);
        }
    }
    Ok(graphs)
}

fn parse_record(
    path: &Path,
    row: usize,
    line: &str,
    weighted: bool,
) -> Result<(u64, u64, f64), GraphError> {
    let malformed = || GraphError::MalformedRecord {
        path: path.to_path_buf(),
        row,
    };

    let mut fields = line.split_whitespace();
    let source: u64 = fields
        .next()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(malformed)?;
    let target: u64 = fields
        .next()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(malformed)?;

    let weight = if weighted {
        let value: f64 = fields
            .next()
            .and_then(|raw| raw.parse().ok())
            .filter(|value: &f64| value.is_finite())
            .ok_or_else(malformed)?;
        if value < 0.0 {
            return Err(GraphError::NegativeWeight {
                path: path.to_path_buf(),
                row,
                line: line.to_owned(),
            });
        }
        value
    } else {
        1.0
    };

    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((source, target, weight))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::error::GraphErrorCode;

    fn write_edges(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn loads_unweighted_two_column_input() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_edges(&dir, "plain.tsv", "1\t2\n2\t3\n");
        let graph = load_graph(&path, false).expect("file parses");
        assert!(!graph.is_weighted());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.total_weight(), 2.0);
    }

    #[test]
    fn loads_weighted_three_column_input() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_edges(&dir, "weighted.tsv", "1\t2\t0.5\n2\t3\t1.5\n");
        let graph = load_graph(&path, false).expect("file parses");
        assert!(graph.is_weighted());
        assert_eq!(graph.total_weight(), 2.0);
    }

    #[test]
    fn reports_negative_weights_with_row_and_line() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_edges(&dir, "weighted.tsv", "1\t2\t0.5\n2\t3\t-1\n");
        let err = load_graph(&path, false).expect_err("negative weight rejected");
        match err {
            GraphError::NegativeWeight { row, line, .. } => {
                assert_eq!(row, 2);
                assert_eq!(line, "2\t3\t-1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_files() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_edges(&dir, "empty.tsv", "");
        let err = load_graph(&path, false).expect_err("empty input rejected");
        assert_eq!(err.code(), GraphErrorCode::Empty);
    }

    #[test]
    fn rejects_missing_files() {
        let dir = TempDir::new().expect("temp dir");
        let err =
            load_graph(&dir.path().join("missing.tsv"), false).expect_err("missing path rejected");
        assert_eq!(err.code(), GraphErrorCode::Io);
    }

    #[rstest]
    #[case::single_column("7\n")]
    #[case::non_numeric_endpoint("a\tb\n")]
    #[case::non_numeric_weight("1\t2\tx\n")]
    #[case::extra_column_when_unweighted("1\t2\n1\t2\t3\t4\n")]
    fn rejects_malformed_records(#[case] contents: &str) {
        let dir = TempDir::new().expect("temp dir");
        let path = write_edges(&dir, "bad.tsv", contents);
        let err = load_graph(&path, false).expect_err("malformed input rejected");
        assert_eq!(err.code(), GraphErrorCode::MalformedRecord);
    }

    #[test]
    fn rejects_mixed_formats_across_files() {
        let dir = TempDir::new().expect("temp dir");
        let plain = write_edges(&dir, "plain.tsv", "1\t2\n");
        let weighted = write_edges(&dir, "weighted.tsv", "1\t2\t0.5\n");
        let err = load_graphs(&[plain, weighted], false).expect_err("mixed formats rejected");
        assert_eq!(err.code(), GraphErrorCode::MixedFormats);
    }

    #[test]
    fn accepts_matching_formats_across_files() {
        let dir = TempDir::new().expect("temp dir");
        let a = write_edges(&dir, "a.tsv", "1\t2\n");
        let b = write_edges(&dir, "b.tsv", "3\t4\n");
        let graphs = load_graphs(&[a, b], false).expect("formats agree");
        assert_eq!(graphs.len(), 2);
    }
}
