//! Optimizer configuration surface.

use std::fmt;

/// Quality-function family used to score candidate node moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigModel {
    /// Reichardt–Bornholdt configuration-model modularity with a
    /// resolution parameter.
    Rb,
    /// Reichardt–Bornholdt with an Erdős–Rényi null model.
    Rber,
    /// Constant Potts model.
    Cpm,
    /// Asymptotic surprise.
    Surprise,
    /// Significance of the partition against a random graph.
    Significance,
    /// Plain Newman–Girvan modularity.
    Default,
}

impl ConfigModel {
    /// Returns the lowercase name used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rb => "rb",
            Self::Rber => "rber",
            Self::Cpm => "cpm",
            Self::Surprise => "surprise",
            Self::Significance => "significance",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ConfigModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one optimizer run.
///
/// # Examples
/// ```
/// use trellis_louvain::{ConfigModel, LouvainConfig};
///
/// let config = LouvainConfig {
///     resolution: 0.5,
///     seed: Some(11),
///     ..LouvainConfig::default()
/// };
/// assert_eq!(config.model, ConfigModel::Rb);
/// assert!(!config.deep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LouvainConfig {
    /// Quality function to optimize.
    pub model: ConfigModel,
    /// Resolution parameter; higher values favor more, smaller communities.
    pub resolution: f64,
    /// Seed for the visit-order shuffle. `None` draws from entropy, making
    /// the run non-reproducible.
    pub seed: Option<u64>,
    /// Detect overlapping communities by optimizing replicated slices.
    pub overlap: bool,
    /// Emit the full finest-to-coarsest hierarchy instead of one partition.
    pub deep: bool,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            model: ConfigModel::Rb,
            resolution: 0.1,
            seed: None,
            overlap: false,
            deep: false,
        }
    }
}
