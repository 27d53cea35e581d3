//! Unit tests for the CLI pipeline.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use trellis_core::{EdgeKind, SummaryEdge, render_records};

use super::{Cli, CliError, run_cli};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TRIANGLES: &str = "0\t1\n1\t2\n0\t2\n3\t4\n4\t5\n3\t5\n2\t3\n";

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_edge_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn parse_args(path: &std::path::Path, extra: &[&str]) -> Cli {
    let mut args = vec!["trellis".to_owned(), path.display().to_string()];
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));
    Cli::parse_from(args)
}

fn run_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{}", panic_msg),
        Err(err) => err,
    }
}

fn member_edges(edges: &[SummaryEdge]) -> HashMap<u64, u64> {
    edges
        .iter()
        .filter(|edge| edge.kind() == EdgeKind::ClusterToMember)
        .map(|edge| (edge.descendant().get(), edge.ancestor().get()))
        .collect()
}

#[rstest]
fn flat_run_groups_each_triangle_under_one_cluster() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let cli = parse_args(&path, &["--seed", "7", "--resolution-parameter", "1.0"]);

    let edges = run_cli(cli)?;

    assert_eq!(edges.len(), 6);
    assert!(edges.iter().all(|edge| edge.kind() == EdgeKind::ClusterToMember));

    let members = member_edges(&edges);
    assert_eq!(
        members.keys().copied().collect::<HashSet<u64>>(),
        HashSet::from([0, 1, 2, 3, 4, 5]),
    );
    assert_eq!(members[&0], members[&1]);
    assert_eq!(members[&1], members[&2]);
    assert_eq!(members[&3], members[&4]);
    assert_eq!(members[&4], members[&5]);
    assert_ne!(members[&0], members[&5]);
    // Synthetic cluster ids sit above the original id range.
    assert!(members.values().all(|&ancestor| ancestor > 5));
    Ok(())
}

#[rstest]
fn deep_run_anchors_top_clusters_under_one_super_root() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let cli = parse_args(
        &path,
        &["--deep", "--seed", "7", "--resolution-parameter", "1.0"],
    );

    let edges = run_cli(cli)?;

    let cluster_edges: Vec<&SummaryEdge> = edges
        .iter()
        .filter(|edge| edge.kind() == EdgeKind::ClusterToCluster)
        .collect();
    assert_eq!(edges.len(), 8);
    assert_eq!(cluster_edges.len(), 2);
    // Both top clusters hang off the same synthetic super-root.
    assert_eq!(
        cluster_edges[0].ancestor(),
        cluster_edges[1].ancestor(),
    );
    assert_eq!(member_edges(&edges).len(), 6);
    Ok(())
}

#[rstest]
fn seeded_runs_render_byte_identical_records() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let args = ["--seed", "11", "--resolution-parameter", "1.0"];

    let mut first = Vec::new();
    render_records(&run_cli(parse_args(&path, &args))?, &mut first)?;
    let mut second = Vec::new();
    render_records(&run_cli(parse_args(&path, &args))?, &mut second)?;

    assert_eq!(first, second);
    Ok(())
}

#[rstest]
fn isolated_graph_exits_as_no_communities_found() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "loop.tsv", "1\t1\n")?;
    let cli = parse_args(&path, &["--seed", "1"]);

    let err = run_expecting_error(cli, "a lone self-loop yields no communities");
    assert!(matches!(err, CliError::Core(_)));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(err.code(), "EMPTY_PARTITION");
    Ok(())
}

#[rstest]
fn missing_input_maps_to_the_input_error_class() {
    let dir = temp_dir();
    let cli = parse_args(&dir.path().join("missing.tsv"), &[]);

    let err = run_expecting_error(cli, "missing input must fail");
    assert!(matches!(err, CliError::Graph(_)));
    assert_eq!(err.exit_code(), 3);
}

#[rstest]
fn mixed_weighted_and_unweighted_inputs_are_rejected() -> TestResult {
    let dir = temp_dir();
    let plain = create_edge_file(&dir, "plain.tsv", "1\t2\n")?;
    let weighted = create_edge_file(&dir, "weighted.tsv", "1\t2\t0.5\n")?;
    let cli = Cli::parse_from([
        "trellis".to_owned(),
        plain.display().to_string(),
        weighted.display().to_string(),
    ]);

    let err = run_expecting_error(cli, "mixed formats must fail");
    assert_eq!(err.code(), "GRAPH_MIXED_FORMATS");
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[rstest]
fn deep_with_overlap_is_a_configuration_conflict() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let cli = parse_args(&path, &["--deep", "--overlap", "--seed", "7"]);

    let err = run_expecting_error(cli, "deep with overlap must fail");
    assert!(matches!(err, CliError::Detect(_)));
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[rstest]
fn unsupported_model_is_a_configuration_conflict() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let cli = parse_args(&path, &["--configmodel", "surprise", "--seed", "7"]);

    let err = run_expecting_error(cli, "surprise is not implemented");
    assert_eq!(err.code(), "DETECT_UNSUPPORTED_MODEL");
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[rstest]
fn zero_min_cluster_size_is_an_internal_encoding_error() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangles.tsv", TRIANGLES)?;
    let cli = parse_args(&path, &["--min-cluster-size", "0", "--seed", "7"]);

    let err = run_expecting_error(cli, "zero min-cluster-size must fail");
    assert_eq!(err.code(), "INVALID_MIN_CLUSTER_SIZE");
    assert_eq!(err.exit_code(), 2);
    Ok(())
}

#[rstest]
fn clap_rejects_unknown_configuration_models() {
    let result = Cli::try_parse_from(["trellis", "edges.tsv", "--configmodel", "modular"]);
    assert!(result.is_err());
}

#[rstest]
fn clap_requires_at_least_one_input() {
    let result = Cli::try_parse_from(["trellis"]);
    assert!(result.is_err());
}
