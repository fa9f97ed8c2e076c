//! One agent and its decide / act / learn / relink cycle.

use rand::Rng;

use super::action::{check_unique, Metaheuristic, MetaheuristicSuite};
use super::beliefs::{AgentBeliefs, AgentId, RelinkTargetWeights};
use super::decision::DecisionPolicy;
use crate::blackboard::Blackboard;
use crate::error::{SearchError, SearchResult};
use crate::problem::{EvaluationCounter, RouteProblem, Solution};
use crate::relink::{RelinkConfig, RelinkRunner};

/// Which elite route an agent relinks toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelinkTarget {
    /// Always the blackboard's global best.
    #[default]
    GlobalBest,
    /// Personal or global best, drawn from the agent's
    /// [`RelinkTargetWeights`] and adapted after every relink.
    Adaptive,
}

/// Per-agent configuration.
///
/// # Examples
///
/// ```
/// use u_metaswarm::agent::{AgentConfig, DecisionPolicy, DecisionStrategy, Metaheuristic};
///
/// let config = AgentConfig::default()
///     .with_actions(vec![Metaheuristic::Vnd, Metaheuristic::Vns])
///     .with_policy(DecisionPolicy::default().with_strategy(DecisionStrategy::Greedy));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Active actions, in registration order.
    pub actions: Vec<Metaheuristic>,
    pub policy: DecisionPolicy,
    pub suite: MetaheuristicSuite,
    pub relink: RelinkConfig,
    pub relink_target: RelinkTarget,
    /// Initial weights for [`RelinkTarget::Adaptive`].
    pub relink_weights: RelinkTargetWeights,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            actions: Metaheuristic::ALL.to_vec(),
            policy: DecisionPolicy::default(),
            suite: MetaheuristicSuite::default(),
            relink: RelinkConfig::default(),
            relink_target: RelinkTarget::default(),
            relink_weights: RelinkTargetWeights::default(),
        }
    }
}

impl AgentConfig {
    pub fn with_actions(mut self, actions: Vec<Metaheuristic>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_suite(mut self, suite: MetaheuristicSuite) -> Self {
        self.suite = suite;
        self
    }

    pub fn with_relink(mut self, relink: RelinkConfig) -> Self {
        self.relink = relink;
        self
    }

    pub fn with_relink_target(mut self, target: RelinkTarget) -> Self {
        self.relink_target = target;
        self
    }

    pub fn with_relink_weights(mut self, weights: RelinkTargetWeights) -> Self {
        self.relink_weights = weights;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.actions.is_empty() {
            return Err("at least one action is required".into());
        }
        check_unique(&self.actions)?;
        self.policy.validate()?;
        self.suite.validate()?;
        let w = &self.relink_weights;
        if !(0.0..=1.0).contains(&w.p_best) || !(0.0..=1.0).contains(&w.g_best) {
            return Err("relink weights must be in [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&w.step) {
            return Err("relink weight step must be in [0, 1]".into());
        }
        Ok(())
    }
}

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Action chosen in the decide phase.
    pub action: Metaheuristic,
    /// Cost after the action, before relinking.
    pub action_cost: f64,
    /// Whether the action's result was discarded as infeasible.
    pub action_rejected: bool,
    /// Whether a relinking walk ran.
    pub relinked: bool,
    /// The agent's position at the end of the cycle.
    pub solution: Solution,
    pub p_best_updated: bool,
    pub g_best_updated: bool,
}

/// A search agent: beliefs plus configuration.
#[derive(Debug, Clone)]
pub struct Agent {
    beliefs: AgentBeliefs,
    config: AgentConfig,
    cycles: usize,
}

impl Agent {
    pub fn new(id: AgentId, config: AgentConfig) -> Self {
        let beliefs =
            AgentBeliefs::new(id, &config.actions).with_relink_weights(config.relink_weights);
        Self {
            beliefs,
            config,
            cycles: 0,
        }
    }

    pub fn id(&self) -> AgentId {
        self.beliefs.agent()
    }

    pub fn beliefs(&self) -> &AgentBeliefs {
        &self.beliefs
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Completed cycles.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Places the agent at `solution`, which also seeds its personal best.
    pub fn initialize(&mut self, solution: Solution) {
        self.beliefs.try_update_pbest(&solution);
        self.beliefs.update_current_solution(solution);
    }

    /// Runs one full cycle and returns the agent's new position.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UninitializedAgent`] if [`Agent::initialize`] was
    ///   never called.
    /// - [`SearchError::EmptyActionSet`] if no action is registered.
    /// - Errors raised by the chosen action or by path-relinking.
    #[tracing::instrument(level = "debug", skip_all, fields(agent = %self.id(), cycle = self.cycles))]
    pub fn run_cycle<P, R>(
        &mut self,
        problem: &P,
        board: &Blackboard,
        rng: &mut R,
        evaluations: &mut EvaluationCounter,
    ) -> SearchResult<CycleReport>
    where
        P: RouteProblem,
        R: Rng,
    {
        let id = self.id();
        let current = self
            .beliefs
            .current()
            .cloned()
            .ok_or(SearchError::UninitializedAgent { agent: id })?;

        // Decide
        let action = self.config.policy.decide(&self.beliefs, rng)?;
        tracing::debug!(%action, "decided");

        // Act
        let outcome = self
            .config
            .suite
            .execute(action, problem, &current.route, rng, evaluations)?;
        let check = problem.evaluate(&outcome.route, evaluations);
        let action_rejected = !check.feasible;
        let moved = if action_rejected {
            tracing::warn!(%action, "action returned an infeasible route, keeping current position");
            current.clone()
        } else {
            Solution::new(outcome.route, check.cost)
        };

        // Learn
        self.beliefs
            .update_after_action(action, current.cost, moved.cost)?;
        self.beliefs.update_current_solution(moved.clone());
        tracing::debug!(%action, from = current.cost, to = moved.cost, "action finished");

        // Relink
        let target = self.relink_target(board, rng);
        let relinked = target.is_some();
        let final_solution = match target {
            Some((target, used_personal)) => {
                let beliefs = &self.beliefs;
                let suite = &self.config.suite;
                let result = RelinkRunner::run(
                    problem,
                    &moved.route,
                    &target.route,
                    &self.config.relink,
                    |route, evals| suite.execute(beliefs.best_action()?, problem, route, rng, evals),
                    evaluations,
                )?;
                tracing::debug!(
                    outcome = ?result.outcome,
                    steps = result.steps,
                    cost = result.best_cost,
                    "relinked"
                );
                if let Some(used_personal) = used_personal {
                    let improved = result.best_cost < moved.cost;
                    self.beliefs
                        .relink_weights_mut()
                        .update(used_personal, improved);
                }
                Solution::from(result)
            }
            None => {
                tracing::debug!("no elite route yet, skipping relink");
                moved.clone()
            }
        };
        self.beliefs.update_current_solution(final_solution.clone());

        // Personal and global best
        let p_best_updated = self.beliefs.try_update_pbest(&final_solution);
        let g_best_updated = board.try_update(&final_solution.route, final_solution.cost, id);
        if g_best_updated {
            tracing::info!(cost = final_solution.cost, "global best improved");
        }

        self.cycles += 1;
        Ok(CycleReport {
            action,
            action_cost: moved.cost,
            action_rejected,
            relinked,
            solution: final_solution,
            p_best_updated,
            g_best_updated,
        })
    }

    /// Picks the relinking target. Under [`RelinkTarget::Adaptive`] the
    /// flag records which side was used (`true` for the personal best) so
    /// the weights can learn from the outcome. A missing side falls back
    /// to the other one.
    fn relink_target<R: Rng>(
        &self,
        board: &Blackboard,
        rng: &mut R,
    ) -> Option<(Solution, Option<bool>)> {
        let global = board.get().solution();
        match self.config.relink_target {
            RelinkTarget::GlobalBest => global.map(|g| (g, None)),
            RelinkTarget::Adaptive => {
                let personal = self.beliefs.p_best().cloned();
                let want_personal = self.beliefs.relink_weights().choose_personal(rng);
                match (want_personal, personal, global) {
                    (true, Some(p), _) | (false, Some(p), None) => Some((p, Some(true))),
                    (_, _, Some(g)) => Some((g, Some(false))),
                    (_, None, None) => None,
                }
            }
        }
    }
}
