//! Variable Neighborhood Search configuration.

use crate::neighborhood::Neighborhood;

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_metaswarm::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_iterations(100)
///     .with_max_shake_tries(5)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.max_shake_tries, 5);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Neighborhoods used both for shaking and for the inner descent.
    pub neighborhoods: Vec<Neighborhood>,
    /// Number of outer iterations (complete sweeps through all
    /// neighborhoods).
    pub max_iterations: usize,
    /// Draws allowed per neighborhood to find a feasible shaken route.
    pub max_shake_tries: usize,
    /// Stop after this many consecutive sweeps without improvement.
    pub max_no_improve: Option<usize>,
    /// Random seed. When set, the run ignores the caller's generator and
    /// is fully reproducible.
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            neighborhoods: Neighborhood::STANDARD.to_vec(),
            max_iterations: 50,
            max_shake_tries: 10,
            max_no_improve: None,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the ordered neighborhood list.
    pub fn with_neighborhoods(mut self, neighborhoods: Vec<Neighborhood>) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Sets the number of outer iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the shaking try budget per neighborhood.
    pub fn with_max_shake_tries(mut self, n: usize) -> Self {
        self.max_shake_tries = n;
        self
    }

    /// Sets the maximum sweeps without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighborhoods.is_empty() {
            return Err("at least one neighborhood is required".into());
        }
        if self.max_shake_tries == 0 {
            return Err("max_shake_tries must be positive".into());
        }
        Ok(())
    }
}
