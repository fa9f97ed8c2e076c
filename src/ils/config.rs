//! Iterated Local Search configuration.

use crate::neighborhood::Neighborhood;

/// Configuration parameters for Iterated Local Search.
///
/// # Examples
///
/// ```
/// use u_metaswarm::ils::IlsConfig;
///
/// let config = IlsConfig::default()
///     .with_max_iterations(20)
///     .with_perturbation_swaps(3);
/// assert_eq!(config.max_iterations, 20);
/// assert_eq!(config.perturbation_swaps, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsConfig {
    /// Neighborhoods for the inner descent.
    pub neighborhoods: Vec<Neighborhood>,
    /// Number of perturb-and-descend iterations.
    pub max_iterations: usize,
    /// Random swaps applied per perturbation.
    pub perturbation_swaps: usize,
    /// Random seed. When set, the run ignores the caller's generator.
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            neighborhoods: Neighborhood::STANDARD.to_vec(),
            max_iterations: 50,
            perturbation_swaps: 2,
            seed: None,
        }
    }
}

impl IlsConfig {
    /// Sets the ordered neighborhood list for the descent.
    pub fn with_neighborhoods(mut self, neighborhoods: Vec<Neighborhood>) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Sets the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of swaps per perturbation.
    pub fn with_perturbation_swaps(mut self, k: usize) -> Self {
        self.perturbation_swaps = k;
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
        if self.perturbation_swaps == 0 {
            return Err("perturbation_swaps must be positive".into());
        }
        Ok(())
    }
}
