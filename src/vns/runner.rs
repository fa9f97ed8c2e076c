//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm
//!
//! 1. Reject an infeasible starting route x
//! 2. For each outer iteration:
//!    a. Set k = 0
//!    b. While k < k_max:
//!       - **Shaking**: draw random neighbors of x in N_k until one is
//!         feasible, at most `max_shake_tries` times; if none, k = k + 1
//!       - **Local search**: apply VND to the shaken route → x''
//!       - **Move or not**: if f(x'') < f(x), set x = x'' and k = 0;
//!         otherwise k = k + 1
//! 3. Return the best route found
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use rand::Rng;
use u_numflow::random::create_rng;

use super::config::VnsConfig;
use crate::error::{SearchError, SearchResult};
use crate::neighborhood::Neighborhood;
use crate::problem::{EvaluationCounter, NodeId, Route, RouteProblem, Solution};
use crate::vnd::VndRunner;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Best route found.
    pub best: Route,
    /// Cost of the best route.
    pub best_cost: f64,
    /// Total neighborhood steps executed.
    pub iterations: usize,
    /// Outer iteration at which the best route was found.
    pub best_iteration: usize,
    /// Shaking steps that found no feasible neighbor within the try budget.
    pub failed_shakes: usize,
    /// Best cost at the end of each outer iteration.
    pub cost_history: Vec<f64>,
}

impl From<VnsResult> for Solution {
    fn from(result: VnsResult) -> Self {
        Solution::new(result.best, result.best_cost)
    }
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes Basic VNS from `initial`.
    ///
    /// Randomness comes from `rng` unless the config carries a seed, in
    /// which case a generator is seeded once at entry and used for the
    /// whole run.
    ///
    /// # Errors
    ///
    /// [`SearchError::InfeasibleStart`] if `initial` is not feasible.
    pub fn run<P, R>(
        problem: &P,
        initial: &[NodeId],
        config: &VnsConfig,
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<VnsResult>
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
        config: &VnsConfig,
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<VnsResult>
    where
        P: RouteProblem,
        R: Rng,
    {
        let start = problem.evaluate(initial, evaluations);
        if !start.feasible {
            return Err(SearchError::InfeasibleStart { stage: "VNS" });
        }

        let neighborhoods = &config.neighborhoods;
        let k_max = neighborhoods.len();

        let mut current = initial.to_vec();
        let mut current_cost = start.cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut best_iteration = 0;

        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut no_improve_count = 0;
        let mut failed_shakes = 0;
        let mut iteration = 0;

        for outer in 0..config.max_iterations {
            let mut improved_this_sweep = false;
            let mut k = 0;

            while k < k_max {
                iteration += 1;

                // Shaking: random feasible neighbor in neighborhood k
                let Some(shaken) = shake(
                    problem,
                    &current,
                    neighborhoods[k],
                    config.max_shake_tries,
                    rng,
                    evaluations,
                ) else {
                    failed_shakes += 1;
                    k += 1;
                    continue;
                };

                // Local search on shaken solution
                let candidate = VndRunner::descend(problem, &shaken, neighborhoods, evaluations)?;

                if candidate.best_cost < current_cost {
                    // improvement: accept and restart from the first neighborhood
                    current = candidate.best;
                    current_cost = candidate.best_cost;
                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                        best_iteration = outer;
                    }
                    improved_this_sweep = true;
                    k = 0;
                } else {
                    k += 1;
                }
            }

            cost_history.push(best_cost);

            if improved_this_sweep {
                no_improve_count = 0;
            } else {
                no_improve_count += 1;
            }
            if config
                .max_no_improve
                .is_some_and(|limit| no_improve_count >= limit)
            {
                tracing::debug!(outer, best_cost, "VNS stagnated");
                break;
            }
        }

        Ok(VnsResult {
            best,
            best_cost,
            iterations: iteration,
            best_iteration,
            failed_shakes,
            cost_history,
        })
    }
}

/// Draws up to `tries` random neighbors and returns the first feasible one.
fn shake<P, R>(
    problem: &P,
    route: &[NodeId],
    neighborhood: Neighborhood,
    tries: usize,
    rng: &mut R,
    evaluations: &mut EvaluationCounter,
) -> Option<Route>
where
    P: RouteProblem,
    R: Rng,
{
    for _ in 0..tries {
        let candidate = neighborhood.random_neighbor(route, rng)?;
        if problem.evaluate(&candidate, evaluations).feasible {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{construct_initial_solution, fixtures};
    use crate::vnd::{VndConfig, VndRunner};

    fn start(instance: &crate::problem::Instance, seed: u64) -> Solution {
        let mut rng = create_rng(seed);
        let mut evals = EvaluationCounter::new();
        construct_initial_solution(instance, &mut rng, 10, &mut evals).unwrap()
    }

    #[test]
    fn test_vns_returns_feasible_improvement() {
        let instance = fixtures::paired(10, 1);
        let initial = start(&instance, 2);
        let config = VnsConfig::default().with_max_iterations(5).with_seed(42);
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let result = VnsRunner::run(&instance, &initial.route, &config, &mut rng, &mut evals).unwrap();

        assert!(instance.is_feasible(&result.best));
        assert!(result.best_cost <= initial.cost);
        assert!((instance.cost(&result.best) - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_vns_cost_history_non_increasing() {
        let instance = fixtures::paired(10, 8);
        let initial = start(&instance, 8);
        let config = VnsConfig::default().with_max_iterations(8).with_seed(42);
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let result = VnsRunner::run(&instance, &initial.route, &config, &mut rng, &mut evals).unwrap();

        assert_eq!(result.cost_history.len(), 8);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_vns_seed_reproducible() {
        let instance = fixtures::paired(9, 5);
        let initial = start(&instance, 5);
        let config = VnsConfig::default().with_max_iterations(4).with_seed(123);

        // different caller generators must not matter when a seed is set
        let mut rng_a = create_rng(1);
        let mut rng_b = create_rng(2);
        let mut evals_a = EvaluationCounter::new();
        let mut evals_b = EvaluationCounter::new();

        let a = VnsRunner::run(&instance, &initial.route, &config, &mut rng_a, &mut evals_a).unwrap();
        let b = VnsRunner::run(&instance, &initial.route, &config, &mut rng_b, &mut evals_b).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.cost_history, b.cost_history);
        assert_eq!(evals_a.count(), evals_b.count());
    }

    #[test]
    fn test_vns_not_worse_than_vnd() {
        let instance = fixtures::paired(10, 13);
        let initial = start(&instance, 13);
        let mut evals = EvaluationCounter::new();
        let mut rng = create_rng(0);

        let vnd = VndRunner::run(&instance, &initial.route, &VndConfig::default(), &mut evals).unwrap();
        let vns = VnsRunner::run(
            &instance,
            &vnd.best,
            &VnsConfig::default().with_max_iterations(3),
            &mut rng,
            &mut evals,
        )
        .unwrap();

        assert!(vns.best_cost <= vnd.best_cost);
    }

    #[test]
    fn test_vns_zero_iterations_returns_start() {
        let instance = fixtures::five_node();
        let initial = vec![0, 1, 2, 3, 4, 0];
        let config = VnsConfig::default().with_max_iterations(0);
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let result = VnsRunner::run(&instance, &initial, &config, &mut rng, &mut evals).unwrap();

        assert_eq!(result.best, initial);
        assert_eq!(result.iterations, 0);
        assert!(result.cost_history.is_empty());
    }

    #[test]
    fn test_vns_rejects_infeasible_start() {
        let instance = fixtures::five_node();
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let err = VnsRunner::run(
            &instance,
            &[0, 4, 1, 2, 3, 0],
            &VnsConfig::default(),
            &mut rng,
            &mut evals,
        )
        .unwrap_err();

        assert_eq!(err, SearchError::InfeasibleStart { stage: "VNS" });
    }

    #[test]
    fn test_vns_stagnation_termination() {
        let instance = fixtures::five_node();
        let config = VnsConfig::default()
            .with_max_iterations(10_000)
            .with_max_no_improve(3)
            .with_seed(42);
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let result =
            VnsRunner::run(&instance, &[0, 1, 2, 3, 4, 0], &config, &mut rng, &mut evals).unwrap();

        assert!(
            result.cost_history.len() < 10_000,
            "expected early termination, got {} outer iterations",
            result.cost_history.len()
        );
    }

    #[test]
    fn test_vns_tiny_route_cannot_shake() {
        // one stop: no interior pair to move, every shake fails
        let nodes = vec![
            crate::problem::Node::new(0, 0, 0),
            crate::problem::Node::new(1, 1, 1),
        ];
        let instance =
            crate::problem::Instance::new(nodes, fixtures::line_matrix(2), 3).unwrap();
        let config = VnsConfig::default().with_max_iterations(2);
        let mut rng = create_rng(0);
        let mut evals = EvaluationCounter::new();

        let result = VnsRunner::run(&instance, &[0, 1, 0], &config, &mut rng, &mut evals).unwrap();

        assert_eq!(result.best, vec![0, 1, 0]);
        assert_eq!(result.failed_shakes, 4);
    }

    #[test]
    fn test_vns_config_defaults() {
        let config = VnsConfig::default();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.max_shake_tries, 10);
        assert!(config.max_no_improve.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_vns_config_validate() {
        assert!(VnsConfig::default().with_max_shake_tries(0).validate().is_err());
        assert!(VnsConfig::default()
            .with_neighborhoods(vec![])
            .validate()
            .is_err());
    }
}
