//! Variable Neighborhood Descent execution engine.
//!
//! # Algorithm
//!
//! 1. Reject an infeasible starting route
//! 2. Set k = 0
//! 3. While k < k_max:
//!    a. Evaluate every neighbor of x in N_k, skipping infeasible ones
//!    b. If the best neighbor x' has f(x') < f(x), set x = x' and k = 0
//!    c. Otherwise k = k + 1
//! 4. Return x

use super::config::VndConfig;
use crate::error::{SearchError, SearchResult};
use crate::neighborhood::Neighborhood;
use crate::problem::{EvaluationCounter, NodeId, Route, RouteProblem, Solution};

/// Result of a VND run.
#[derive(Debug, Clone)]
pub struct VndResult {
    /// Locally optimal route.
    pub best: Route,
    /// Cost of the locally optimal route.
    pub best_cost: f64,
    /// Number of improving moves applied.
    pub improvements: usize,
    /// Cost after the start and after every improving move.
    pub cost_history: Vec<f64>,
}

impl From<VndResult> for Solution {
    fn from(result: VndResult) -> Self {
        Solution::new(result.best, result.best_cost)
    }
}

/// Variable Neighborhood Descent runner.
pub struct VndRunner;

impl VndRunner {
    /// Descends from `initial` to a local optimum.
    ///
    /// # Errors
    ///
    /// [`SearchError::InfeasibleStart`] if `initial` is not feasible; no
    /// search is performed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_metaswarm::problem::{EvaluationCounter, Instance, Node, RouteProblem};
    /// use u_metaswarm::vnd::{VndConfig, VndRunner};
    ///
    /// let nodes = vec![Node::new(0, 0, 0), Node::new(1, 1, 0), Node::new(2, 0, 1)];
    /// let matrix = vec![
    ///     vec![0.0, 1.0, 5.0],
    ///     vec![1.0, 0.0, 1.0],
    ///     vec![5.0, 1.0, 0.0],
    /// ];
    /// let instance = Instance::new(nodes, matrix, 2).unwrap();
    /// let mut evals = EvaluationCounter::new();
    ///
    /// let result = VndRunner::run(&instance, &[0, 1, 2, 0], &VndConfig::default(), &mut evals).unwrap();
    /// assert!(instance.is_feasible(&result.best));
    /// ```
    pub fn run<P: RouteProblem>(
        problem: &P,
        initial: &[NodeId],
        config: &VndConfig,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<VndResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Self::descend(problem, initial, &config.neighborhoods, evaluations)
    }

    /// Descent over an explicit neighborhood list; shared by VNS and ILS.
    pub(crate) fn descend<P: RouteProblem>(
        problem: &P,
        initial: &[NodeId],
        neighborhoods: &[Neighborhood],
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<VndResult> {
        let start = problem.evaluate(initial, evaluations);
        if !start.feasible {
            return Err(SearchError::InfeasibleStart { stage: "VND" });
        }

        let mut current = initial.to_vec();
        let mut current_cost = start.cost;
        let mut scratch = current.clone();
        let mut improvements = 0;
        let mut cost_history = vec![current_cost];

        let mut k = 0;
        while k < neighborhoods.len() {
            let neighborhood = neighborhoods[k];

            // Steepest descent: first strictly best move wins ties.
            let mut best_move = None;
            let mut best_cost = current_cost;
            for (i, j) in Neighborhood::moves(current.len()) {
                neighborhood.apply(&mut scratch, i, j);
                let eval = problem.evaluate(&scratch, evaluations);
                neighborhood.apply(&mut scratch, i, j);

                if eval.feasible && eval.cost < best_cost {
                    best_cost = eval.cost;
                    best_move = Some((i, j));
                }
            }

            match best_move {
                Some((i, j)) => {
                    neighborhood.apply(&mut current, i, j);
                    neighborhood.apply(&mut scratch, i, j);
                    current_cost = best_cost;
                    improvements += 1;
                    cost_history.push(current_cost);
                    k = 0;
                }
                None => k += 1,
            }
        }

        Ok(VndResult {
            best: current,
            best_cost: current_cost,
            improvements,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::fixtures;

    fn sorted(route: &[NodeId]) -> Vec<NodeId> {
        let mut v = route.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_vnd_five_node_scenario() {
        let instance = fixtures::five_node();
        let initial = vec![0, 1, 2, 3, 4, 0];
        let initial_cost = instance.cost(&initial);
        let mut evals = EvaluationCounter::new();

        let result = VndRunner::run(&instance, &initial, &VndConfig::default(), &mut evals).unwrap();

        assert!(instance.is_feasible(&result.best));
        assert!(
            result.best_cost <= initial_cost,
            "VND worsened the route: {} > {initial_cost}",
            result.best_cost
        );
        assert_eq!(sorted(&result.best), sorted(&initial));
        assert_eq!(result.best[0], 0);
        assert_eq!(*result.best.last().unwrap(), 0);
        assert!((instance.cost(&result.best) - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_vnd_improves_five_node_start() {
        // 0-1-2-3-4-0 zig-zags across the 10-unit gap four times
        let instance = fixtures::five_node();
        let initial = vec![0, 1, 2, 3, 4, 0];
        let mut evals = EvaluationCounter::new();

        let result = VndRunner::run(&instance, &initial, &VndConfig::default(), &mut evals).unwrap();

        assert!(result.improvements > 0);
        assert!(result.best_cost < instance.cost(&initial));
    }

    #[test]
    fn test_vnd_idempotent() {
        let instance = fixtures::paired(10, 11);
        let mut rng = u_numflow::random::create_rng(5);
        let mut evals = EvaluationCounter::new();
        let start = crate::problem::construct_initial_solution(&instance, &mut rng, 10, &mut evals)
            .unwrap();

        let first = VndRunner::run(&instance, &start.route, &VndConfig::default(), &mut evals).unwrap();
        let second = VndRunner::run(&instance, &first.best, &VndConfig::default(), &mut evals).unwrap();

        assert_eq!(second.best, first.best);
        assert_eq!(second.best_cost, first.best_cost);
        assert_eq!(second.improvements, 0);
    }

    #[test]
    fn test_vnd_local_optimum_has_no_improving_neighbor() {
        let instance = fixtures::paired(8, 21);
        let mut rng = u_numflow::random::create_rng(9);
        let mut evals = EvaluationCounter::new();
        let start = crate::problem::construct_initial_solution(&instance, &mut rng, 10, &mut evals)
            .unwrap();

        let result = VndRunner::run(&instance, &start.route, &VndConfig::default(), &mut evals).unwrap();

        for nb in Neighborhood::STANDARD {
            for neighbor in nb.neighbors(&result.best) {
                if instance.is_feasible(&neighbor) {
                    assert!(instance.cost(&neighbor) >= result.best_cost);
                }
            }
        }
    }

    #[test]
    fn test_vnd_cost_history_decreasing() {
        let instance = fixtures::paired(10, 4);
        let mut rng = u_numflow::random::create_rng(3);
        let mut evals = EvaluationCounter::new();
        let start = crate::problem::construct_initial_solution(&instance, &mut rng, 10, &mut evals)
            .unwrap();

        let result = VndRunner::run(&instance, &start.route, &VndConfig::default(), &mut evals).unwrap();

        assert_eq!(result.cost_history.len(), result.improvements + 1);
        for window in result.cost_history.windows(2) {
            assert!(window[1] < window[0], "{} !< {}", window[1], window[0]);
        }
    }

    #[test]
    fn test_vnd_rejects_infeasible_start() {
        let instance = fixtures::five_node();
        let mut evals = EvaluationCounter::new();

        let err = VndRunner::run(&instance, &[0, 3, 1, 2, 4, 0], &VndConfig::default(), &mut evals)
            .unwrap_err();

        assert_eq!(err, SearchError::InfeasibleStart { stage: "VND" });
        assert_eq!(evals.count(), 0, "no search should be performed");
    }

    #[test]
    fn test_vnd_counts_evaluations() {
        let instance = fixtures::five_node();
        let mut evals = EvaluationCounter::new();

        VndRunner::run(&instance, &[0, 1, 2, 3, 4, 0], &VndConfig::default(), &mut evals).unwrap();

        assert!(evals.count() > 1);
    }

    #[test]
    fn test_vnd_single_neighborhood() {
        let instance = fixtures::five_node();
        let config = VndConfig::default().with_neighborhoods(vec![Neighborhood::Reversal]);
        let mut evals = EvaluationCounter::new();

        let result = VndRunner::run(&instance, &[0, 1, 2, 3, 4, 0], &config, &mut evals).unwrap();

        assert!(instance.is_feasible(&result.best));
        assert!(result.best_cost <= instance.cost(&[0, 1, 2, 3, 4, 0]));
    }
}
