//! Starting-solution construction with a bounded retry budget.

use rand::Rng;

use super::types::{EvaluationCounter, RouteProblem, Solution};
use crate::error::{SearchError, SearchResult};

/// Default number of construction attempts before giving up.
pub const DEFAULT_CONSTRUCTION_ATTEMPTS: usize = 100;

/// Builds a feasible starting solution.
///
/// Calls [`RouteProblem::random_route`] up to `max_attempts` times and
/// returns the first route that evaluates feasible. Exhausting the budget
/// means the instance is likely infeasible (or the budget too small) and
/// is reported as [`SearchError::ConstructionExhausted`].
pub fn construct_initial_solution<P, R>(
    problem: &P,
    rng: &mut R,
    max_attempts: usize,
    evaluations: &mut EvaluationCounter,
) -> SearchResult<Solution>
where
    P: RouteProblem,
    R: Rng,
{
    for attempt in 0..max_attempts {
        let Some(route) = problem.random_route(rng) else {
            tracing::debug!(attempt, "construction hit a dead end");
            continue;
        };
        let eval = problem.evaluate(&route, evaluations);
        if eval.feasible {
            return Ok(Solution::new(route, eval.cost));
        }
    }
    Err(SearchError::ConstructionExhausted {
        attempts: max_attempts,
    })
}
