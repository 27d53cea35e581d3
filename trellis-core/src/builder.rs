//! Builder utilities for configuring the hierarchy encoder.

use std::num::NonZeroUsize;

use crate::{Result, error::TrellisError, trellis::Trellis};

/// Configures and constructs [`Trellis`] instances.
///
/// # Examples
/// ```
/// use trellis_core::TrellisBuilder;
///
/// let trellis = TrellisBuilder::new()
///     .with_min_cluster_size(3)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(trellis.min_cluster_size().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TrellisBuilder {
    min_cluster_size: usize,
}

impl Default for TrellisBuilder {
    fn default() -> Self {
        Self {
            min_cluster_size: 2,
        }
    }
}

impl TrellisBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use trellis_core::TrellisBuilder;
    ///
    /// assert_eq!(TrellisBuilder::new().min_cluster_size(), 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the minimum number of distinct members per cluster.
    #[must_use]
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Returns the configured minimum cluster size.
    #[must_use]
    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    /// Validates the configuration and constructs a [`Trellis`] instance.
    ///
    /// # Errors
    /// Returns [`TrellisError::InvalidMinClusterSize`] when the minimum
    /// cluster size is zero.
    pub fn build(self) -> Result<Trellis> {
        let min_cluster_size = NonZeroUsize::new(self.min_cluster_size).ok_or(
            TrellisError::InvalidMinClusterSize {
                got: self.min_cluster_size,
            },
        )?;
        Ok(Trellis::new(min_cluster_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_min_cluster_size() {
        let err = TrellisBuilder::new()
            .with_min_cluster_size(0)
            .build()
            .expect_err("zero minimum must fail");
        assert_eq!(err, TrellisError::InvalidMinClusterSize { got: 0 });
    }
}
