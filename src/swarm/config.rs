//! Swarm configuration.

use crate::agent::AgentConfig;
use crate::problem::DEFAULT_CONSTRUCTION_ATTEMPTS;

/// Configuration parameters for a cooperative swarm run.
///
/// # Examples
///
/// ```
/// use u_metaswarm::swarm::SwarmConfig;
///
/// let config = SwarmConfig::default()
///     .with_agent_count(3)
///     .with_max_cycles(10)
///     .with_max_evaluations(50_000)
///     .with_seed(42);
/// assert_eq!(config.agent_count, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmConfig {
    /// Number of agents.
    pub agent_count: usize,
    /// Cycles each agent runs.
    pub max_cycles: usize,
    /// Per-agent evaluation budget, checked between cycles.
    pub max_evaluations: Option<u64>,
    /// Random construction attempts per agent before giving up.
    pub construction_attempts: usize,
    /// Base seed. Agent `i` draws from a generator seeded with `seed + i`.
    pub seed: Option<u64>,
    /// Run agents on the rayon pool. Ignored without the `parallel`
    /// feature; agents then take turns cycle by cycle.
    pub parallel: bool,
    /// Configuration shared by every agent.
    pub agent: AgentConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            max_cycles: 20,
            max_evaluations: None,
            construction_attempts: DEFAULT_CONSTRUCTION_ATTEMPTS,
            seed: None,
            parallel: true,
            agent: AgentConfig::default(),
        }
    }
}

impl SwarmConfig {
    /// Sets the number of agents.
    pub fn with_agent_count(mut self, n: usize) -> Self {
        self.agent_count = n;
        self
    }

    /// Sets the number of cycles per agent.
    pub fn with_max_cycles(mut self, n: usize) -> Self {
        self.max_cycles = n;
        self
    }

    /// Sets the per-agent evaluation budget.
    pub fn with_max_evaluations(mut self, n: u64) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    /// Sets the construction attempt budget.
    pub fn with_construction_attempts(mut self, n: usize) -> Self {
        self.construction_attempts = n;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables running agents on the thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the per-agent configuration.
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.agent_count == 0 {
            return Err("agent_count must be positive".into());
        }
        if self.construction_attempts == 0 {
            return Err("construction_attempts must be positive".into());
        }
        self.agent.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwarmConfig::default();
        assert_eq!(config.agent_count, 5);
        assert_eq!(config.max_cycles, 20);
        assert_eq!(config.construction_attempts, 100);
        assert!(config.max_evaluations.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(SwarmConfig::default().with_agent_count(0).validate().is_err());
        assert!(SwarmConfig::default()
            .with_construction_attempts(0)
            .validate()
            .is_err());
        assert!(SwarmConfig::default()
            .with_agent(AgentConfig::default().with_actions(vec![]))
            .validate()
            .is_err());
    }
}
