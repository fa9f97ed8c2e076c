//! Variable Neighborhood Descent configuration.

use crate::neighborhood::Neighborhood;

/// Configuration parameters for Variable Neighborhood Descent.
///
/// # Examples
///
/// ```
/// use u_metaswarm::neighborhood::Neighborhood;
/// use u_metaswarm::vnd::VndConfig;
///
/// let config = VndConfig::default().with_neighborhoods(vec![Neighborhood::Reversal]);
/// assert_eq!(config.neighborhoods, vec![Neighborhood::Reversal]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VndConfig {
    /// Neighborhoods in the order they are explored.
    pub neighborhoods: Vec<Neighborhood>,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            neighborhoods: Neighborhood::STANDARD.to_vec(),
        }
    }
}

impl VndConfig {
    /// Sets the ordered neighborhood list.
    pub fn with_neighborhoods(mut self, neighborhoods: Vec<Neighborhood>) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighborhoods.is_empty() {
            return Err("at least one neighborhood is required".into());
        }
        Ok(())
    }
}
