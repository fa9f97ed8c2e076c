//! Path-relinking configuration.

/// Configuration parameters for path-relinking.
///
/// # Examples
///
/// ```
/// use u_metaswarm::relink::RelinkConfig;
///
/// let config = RelinkConfig::default().with_revert_infeasible(true);
/// assert!(config.revert_infeasible);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelinkConfig {
    /// Undo a directed swap that makes the working route infeasible.
    ///
    /// Off by default: the walk then continues from the infeasible
    /// intermediate route, and later positions may pass through more
    /// infeasible states before reaching a feasible one.
    pub revert_infeasible: bool,
}

impl RelinkConfig {
    /// Enables or disables undoing infeasible swaps.
    pub fn with_revert_infeasible(mut self, revert: bool) -> Self {
        self.revert_infeasible = revert;
        self
    }
}
