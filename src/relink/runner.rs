//! Path-relinking walk.
//!
//! # Algorithm
//!
//! 1. Reject an infeasible origin; record its cost f(s)
//! 2. For each interior position i, left to right:
//!    a. Skip if the working route already matches the target at i
//!    b. Swap the target's node at i into place (directed swap)
//!    c. If infeasible, continue (optionally undoing the swap)
//!    d. Track the best feasible route along the path
//!    e. If the cost beats f(s), intensify from here and return
//! 3. Return the best route along the path

use super::config::RelinkConfig;
use crate::error::{SearchError, SearchResult};
use crate::problem::{EvaluationCounter, NodeId, Route, RouteProblem, Solution};

/// How a relinking walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelinkOutcome {
    /// The walk reached the target without beating the origin.
    Exhausted,
    /// An intermediate route beat the origin and was intensified.
    Intensified,
    /// An intermediate route beat the origin but the intensifier returned
    /// an infeasible route; the best route along the path is returned.
    IntensifierRejected,
}

/// Result of a path-relinking walk.
#[derive(Debug, Clone)]
pub struct RelinkResult {
    /// Returned route.
    pub best: Route,
    /// Cost of the returned route.
    pub best_cost: f64,
    /// Directed swaps performed.
    pub steps: usize,
    /// Directed swaps that produced an infeasible intermediate route.
    pub infeasible_steps: usize,
    /// How the walk ended.
    pub outcome: RelinkOutcome,
}

impl From<RelinkResult> for Solution {
    fn from(result: RelinkResult) -> Self {
        Solution::new(result.best, result.best_cost)
    }
}

/// Path-relinking runner.
pub struct RelinkRunner;

impl RelinkRunner {
    /// Relinks `origin` toward `target`.
    ///
    /// `intensify` is invoked at most once, on the first feasible
    /// intermediate route that beats the origin's cost.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InfeasibleStart`] if `origin` is not feasible.
    /// - [`SearchError::TargetMismatch`] if `target` is not a permutation of
    ///   `origin`'s nodes.
    /// - Any error returned by `intensify`.
    pub fn run<P, F>(
        problem: &P,
        origin: &[NodeId],
        target: &[NodeId],
        config: &RelinkConfig,
        mut intensify: F,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<RelinkResult>
    where
        P: RouteProblem,
        F: FnMut(&[NodeId], &mut EvaluationCounter) -> SearchResult<Solution>,
    {
        let start = problem.evaluate(origin, evaluations);
        if !start.feasible {
            return Err(SearchError::InfeasibleStart {
                stage: "path-relinking",
            });
        }
        if !same_nodes(origin, target) {
            return Err(SearchError::TargetMismatch);
        }

        let origin_cost = start.cost;
        let mut working = origin.to_vec();
        let mut best = origin.to_vec();
        let mut best_cost = origin_cost;
        let mut steps = 0;
        let mut infeasible_steps = 0;

        for i in 1..working.len().saturating_sub(1) {
            if working[i] == target[i] {
                continue;
            }
            let Some(j) = working.iter().position(|&node| node == target[i]) else {
                return Err(SearchError::TargetMismatch);
            };

            // Directed swap
            working.swap(i, j);
            steps += 1;

            let eval = problem.evaluate(&working, evaluations);
            if !eval.feasible {
                infeasible_steps += 1;
                if config.revert_infeasible {
                    working.swap(i, j);
                }
                continue;
            }

            if eval.cost < best_cost {
                best.copy_from_slice(&working);
                best_cost = eval.cost;
            }

            // Opportunistic stop
            if eval.cost < origin_cost {
                let intensified = intensify(&working, evaluations)?;
                let check = problem.evaluate(&intensified.route, evaluations);
                if check.feasible {
                    return Ok(RelinkResult {
                        best: intensified.route,
                        best_cost: check.cost,
                        steps,
                        infeasible_steps,
                        outcome: RelinkOutcome::Intensified,
                    });
                }
                tracing::debug!(step = steps, "intensifier returned an infeasible route");
                return Ok(RelinkResult {
                    best,
                    best_cost,
                    steps,
                    infeasible_steps,
                    outcome: RelinkOutcome::IntensifierRejected,
                });
            }
        }

        Ok(RelinkResult {
            best,
            best_cost,
            steps,
            infeasible_steps,
            outcome: RelinkOutcome::Exhausted,
        })
    }
}

fn same_nodes(a: &[NodeId], b: &[NodeId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
