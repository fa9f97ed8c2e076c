//! Iterated Local Search execution loop.

use rand::Rng;
use u_numflow::random::create_rng;

use super::config::IlsConfig;
use crate::error::{SearchError, SearchResult};
use crate::neighborhood::random_pair;
use crate::problem::{EvaluationCounter, NodeId, Route, RouteProblem, Solution};
use crate::vnd::VndRunner;

/// Result of an ILS run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    /// Best route found, including the initial descent.
    pub best: Route,
    /// Cost of the best route.
    pub best_cost: f64,
    /// Iterations executed.
    pub iterations: usize,
    /// Perturbations discarded because they were infeasible.
    pub rejected_perturbations: usize,
    /// Accepted improvements after the initial descent.
    pub improvements: usize,
    /// Best cost after the initial descent and after each iteration.
    pub cost_history: Vec<f64>,
}

impl From<IlsResult> for Solution {
    fn from(result: IlsResult) -> Self {
        Solution::new(result.best, result.best_cost)
    }
}

/// Applies `swaps` random exchanges of two distinct interior positions.
///
/// The depot endpoints are never moved. Returns `None` if the route has
/// fewer than two interior positions.
pub fn perturb<R: Rng>(route: &[NodeId], swaps: usize, rng: &mut R) -> Option<Route> {
    let mut perturbed = route.to_vec();
    for _ in 0..swaps {
        let (i, j) = random_pair(perturbed.len(), rng)?;
        perturbed.swap(i, j);
    }
    Some(perturbed)
}

/// Iterated Local Search runner.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs ILS from `initial`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InfeasibleStart`] if `initial` is not feasible (raised
    /// by the initial descent).
    pub fn run<P, R>(
        problem: &P,
        initial: &[NodeId],
        config: &IlsConfig,
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<IlsResult>
    where
        P: RouteProblem,
        R: Rng,
    {
        config.validate().map_err(SearchError::InvalidConfig)?;

        match config.seed {
            Some(seed) => {
                let mut seeded = create_rng(seed);
                Self::search(problem, initial, config, &mut seeded, evaluations)
            }
            None => Self::search(problem, initial, config, rng, evaluations),
        }
    }

    fn search<P, R>(
        problem: &P,
        initial: &[NodeId],
        config: &IlsConfig,
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<IlsResult>
    where
        P: RouteProblem,
        R: Rng,
    {
        let neighborhoods = &config.neighborhoods;
        let descent = VndRunner::descend(problem, initial, neighborhoods, evaluations)?;

        let mut current = descent.best;
        let mut best_cost = descent.best_cost;

        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best_cost);
        let mut rejected_perturbations = 0;
        let mut improvements = 0;
        let mut iterations = 0;

        for _ in 0..config.max_iterations {
            let Some(perturbed) = perturb(&current, config.perturbation_swaps, rng) else {
                // nothing to perturb on routes with fewer than two stops
                break;
            };
            iterations += 1;

            if !problem.evaluate(&perturbed, evaluations).feasible {
                rejected_perturbations += 1;
                cost_history.push(best_cost);
                continue;
            }

            let candidate = VndRunner::descend(problem, &perturbed, neighborhoods, evaluations)?;

            // Better-only acceptance: current only moves on a new best.
            if candidate.best_cost < best_cost {
                current = candidate.best;
                best_cost = candidate.best_cost;
                improvements += 1;
            }
            cost_history.push(best_cost);
        }

        Ok(IlsResult {
            best: current,
            best_cost,
            iterations,
            rejected_perturbations,
            improvements,
            cost_history,
        })
    }
}
