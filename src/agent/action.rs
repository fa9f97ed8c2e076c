//! The closed set of metaheuristics an agent can choose between.

use rand::Rng;

use crate::error::SearchResult;
use crate::ils::{IlsConfig, IlsRunner};
use crate::problem::{EvaluationCounter, NodeId, RouteProblem, Solution};
use crate::vnd::{VndConfig, VndRunner};
use crate::vns::{VnsConfig, VnsRunner};

/// A metaheuristic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metaheuristic {
    /// Variable Neighborhood Descent.
    Vnd,
    /// Iterated Local Search.
    Ils,
    /// Variable Neighborhood Search.
    Vns,
}

impl Metaheuristic {
    /// Every action, in default registration order.
    pub const ALL: [Metaheuristic; 3] = [Metaheuristic::Vnd, Metaheuristic::Ils, Metaheuristic::Vns];

    pub fn name(self) -> &'static str {
        match self {
            Metaheuristic::Vnd => "VND",
            Metaheuristic::Ils => "ILS",
            Metaheuristic::Vns => "VNS",
        }
    }
}

impl std::fmt::Display for Metaheuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for every action, and the mapping from action to runner.
///
/// # Examples
///
/// ```
/// use u_metaswarm::agent::MetaheuristicSuite;
/// use u_metaswarm::ils::IlsConfig;
///
/// let suite = MetaheuristicSuite::default().with_ils(IlsConfig::default().with_max_iterations(10));
/// assert_eq!(suite.ils.max_iterations, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaheuristicSuite {
    pub vnd: VndConfig,
    pub vns: VnsConfig,
    pub ils: IlsConfig,
}

impl MetaheuristicSuite {
    pub fn with_vnd(mut self, config: VndConfig) -> Self {
        self.vnd = config;
        self
    }

    pub fn with_vns(mut self, config: VnsConfig) -> Self {
        self.vns = config;
        self
    }

    pub fn with_ils(mut self, config: IlsConfig) -> Self {
        self.ils = config;
        self
    }

    /// Validates every action's configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.vnd.validate().map_err(|e| format!("VND: {e}"))?;
        self.vns.validate().map_err(|e| format!("VNS: {e}"))?;
        self.ils.validate().map_err(|e| format!("ILS: {e}"))?;
        Ok(())
    }

    /// Runs `action` from `route` and returns its final solution.
    ///
    /// # Errors
    ///
    /// Whatever the underlying runner raises, most notably
    /// [`SearchError::InfeasibleStart`](crate::error::SearchError::InfeasibleStart).
    pub fn execute<P, R>(
        &self,
        action: Metaheuristic,
        problem: &P,
        route: &[NodeId],
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<Solution>
    where
        P: RouteProblem,
        R: Rng,
    {
        let solution: Solution = match action {
            Metaheuristic::Vnd => VndRunner::run(problem, route, &self.vnd, evaluations)?.into(),
            Metaheuristic::Ils => IlsRunner::run(problem, route, &self.ils, rng, evaluations)?.into(),
            Metaheuristic::Vns => VnsRunner::run(problem, route, &self.vns, rng, evaluations)?.into(),
        };
        Ok(solution)
    }
}

/// Returns an error naming the first duplicated action, if any.
pub(crate) fn check_unique(actions: &[Metaheuristic]) -> Result<(), String> {
    for (i, action) in actions.iter().enumerate() {
        if actions[..i].contains(action) {
            return Err(format!("action {action} is listed more than once"));
        }
    }
    Ok(())
}
