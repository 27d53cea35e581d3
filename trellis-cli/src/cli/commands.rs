//! Command implementation and argument parsing for the trellis CLI.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{info, instrument, warn};

use trellis_core::{SummaryEdge, TrellisBuilder, TrellisError, TrellisErrorCode};
use trellis_graph::{GraphError, load_graphs};
use trellis_louvain::{ConfigModel, DetectError, Louvain, LouvainConfig};

const DEFAULT_RESOLUTION: f64 = 0.1;
const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "trellis",
    about = "Detect communities and print the encoded hierarchy to standard out."
)]
pub struct Cli {
    /// Edge files in tab delimited format.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Treat the input as a directed graph.
    #[arg(long)]
    pub directed: bool,

    /// Configuration model.
    #[arg(long = "configmodel", value_enum, default_value_t = ModelArg::Rb)]
    pub configmodel: ModelArg,

    /// Generate overlapping communities.
    #[arg(long)]
    pub overlap: bool,

    /// Generate the full hierarchy instead of one partition.
    #[arg(long)]
    pub deep: bool,

    /// Resolution parameter: higher for more clusters.
    #[arg(long = "resolution-parameter", default_value_t = DEFAULT_RESOLUTION)]
    pub resolution_parameter: f64,

    /// Seed for the random generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum number of members per reported cluster.
    #[arg(long = "min-cluster-size", default_value_t = DEFAULT_MIN_CLUSTER_SIZE)]
    pub min_cluster_size: usize,
}

/// Configuration models accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    /// Reichardt–Bornholdt configuration-model modularity.
    Rb,
    /// Reichardt–Bornholdt with an Erdős–Rényi null model.
    Rber,
    /// Constant Potts model.
    Cpm,
    /// Asymptotic surprise.
    Surprise,
    /// Partition significance.
    Significance,
    /// Plain modularity.
    Default,
}

impl From<ModelArg> for ConfigModel {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::Rb => Self::Rb,
            ModelArg::Rber => Self::Rber,
            ModelArg::Cpm => Self::Cpm,
            ModelArg::Surprise => Self::Surprise,
            ModelArg::Significance => Self::Significance,
            ModelArg::Default => Self::Default,
        }
    }
}

/// Errors surfaced while executing the CLI pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading an input edge list failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The optimizer rejected the configuration or failed.
    #[error(transparent)]
    Detect(#[from] DetectError),
    /// Encoding the clustering failed.
    #[error(transparent)]
    Core(#[from] TrellisError),
}

impl CliError {
    /// Process exit code class for this failure.
    ///
    /// Input-file errors exit with 3, an empty partition ("no communities
    /// found") with 4, optimizer configuration conflicts with 1, and
    /// internal encoding failures with 2.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Graph(_) => 3,
            Self::Detect(_) => 1,
            Self::Core(core) => match core.code() {
                TrellisErrorCode::EmptyPartition => 4,
                _ => 2,
            },
        }
    }

    /// Stable machine-readable code of the underlying error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Graph(err) => err.code().as_str(),
            Self::Detect(err) => err.code().as_str(),
            Self::Core(err) => err.code().as_str(),
        }
    }
}

/// Executes the full pipeline: load, optimize, encode.
///
/// # Errors
/// Returns [`CliError`] when loading, optimization, or encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use tempfile::NamedTempFile;
/// # use trellis_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "1\t2\n2\t3\n1\t3\n")?;
/// let cli = Cli::parse_from([
///     "trellis",
///     file.path().to_str().expect("temp path is UTF-8"),
///     "--seed",
///     "7",
///     "--resolution-parameter",
///     "1.0",
/// ]);
/// let edges = run_cli(cli)?;
/// assert_eq!(edges.len(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(
        inputs = cli.inputs.len(),
        model = %ConfigModel::from(cli.configmodel),
        deep = cli.deep,
        overlap = cli.overlap,
        min_cluster_size = cli.min_cluster_size,
    ),
)]
pub fn run_cli(cli: Cli) -> Result<Vec<SummaryEdge>, CliError> {
    let graphs = load_graphs(&cli.inputs, cli.directed)?;

    let louvain = Louvain::new(LouvainConfig {
        model: cli.configmodel.into(),
        resolution: cli.resolution_parameter,
        seed: cli.seed,
        overlap: cli.overlap,
        deep: cli.deep,
    });
    let clustering = louvain.detect(&graphs)?;

    let trellis = TrellisBuilder::new()
        .with_min_cluster_size(cli.min_cluster_size)
        .build()?;
    let edges = trellis.encode(&clustering).map_err(|err| {
        if matches!(err, TrellisError::EmptyPartition { .. }) {
            warn!(
                "did not get any clusters from the optimizer; the network may be too \
                 connected or the resolution parameter too extreme"
            );
        }
        err
    })?;

    info!(records = edges.len(), "encoding completed");
    Ok(edges)
}
