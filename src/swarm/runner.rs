//! Swarm execution.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use u_numflow::random::create_rng;

use super::config::SwarmConfig;
use crate::agent::{ActionStats, Agent, AgentId, Metaheuristic, RelinkTargetWeights};
use crate::blackboard::Blackboard;
use crate::error::{SearchError, SearchResult};
use crate::problem::{construct_initial_solution, EvaluationCounter, Route, RouteProblem};

/// Final state of one agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentReport {
    pub agent: AgentId,
    /// Cycles completed.
    pub cycles: usize,
    /// Objective evaluations, construction included.
    pub evaluations: u64,
    /// Cost of the agent's final position.
    pub current_cost: f64,
    /// Cost of the agent's personal best.
    pub p_best_cost: f64,
    /// Statistics per registered action, in registration order.
    pub action_stats: Vec<(Metaheuristic, ActionStats)>,
    pub relink_weights: RelinkTargetWeights,
    /// Position cost after each cycle.
    pub cost_history: Vec<f64>,
}

/// Result of a swarm run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmResult {
    /// Best route found by any agent.
    pub best: Route,
    /// Its cost.
    pub best_cost: f64,
    /// The agent that found it.
    pub best_agent: Option<AgentId>,
    /// Evaluations summed over all agents.
    pub evaluations: u64,
    /// One report per agent, ordered by agent id.
    pub agents: Vec<AgentReport>,
}

/// Cooperative swarm runner.
pub struct SwarmRunner;

impl SwarmRunner {
    /// Runs a swarm on a fresh blackboard.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] if the configuration is invalid.
    /// - [`SearchError::ConstructionExhausted`] if an agent finds no
    ///   feasible starting route.
    /// - Any error an agent cycle raises.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_metaswarm::problem::{Instance, Node, RouteProblem};
    /// use u_metaswarm::swarm::{SwarmConfig, SwarmRunner};
    ///
    /// let nodes = vec![
    ///     Node::new(0, 0, 0),
    ///     Node::new(1, 2, 0),
    ///     Node::new(2, 0, 2),
    ///     Node::new(3, 1, 0),
    ///     Node::new(4, 0, 1),
    /// ];
    /// let matrix: Vec<Vec<f64>> = (0..5)
    ///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
    ///     .collect();
    /// let instance = Instance::new(nodes, matrix, 3).unwrap();
    ///
    /// let config = SwarmConfig::default().with_agent_count(2).with_max_cycles(3).with_seed(7);
    /// let result = SwarmRunner::run(&instance, &config).unwrap();
    /// assert!(instance.is_feasible(&result.best));
    /// ```
    pub fn run<P: RouteProblem>(problem: &P, config: &SwarmConfig) -> SearchResult<SwarmResult> {
        let board = Blackboard::new();
        Self::run_with_blackboard(problem, config, &board)
    }

    /// Runs a swarm that publishes to `board`.
    ///
    /// The board is not reset first, so a route already on it acts as the
    /// initial global best.
    #[tracing::instrument(level = "info", skip_all, fields(agents = config.agent_count))]
    pub fn run_with_blackboard<P: RouteProblem>(
        problem: &P,
        config: &SwarmConfig,
        board: &Blackboard,
    ) -> SearchResult<SwarmResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let mut workers = (0..config.agent_count)
            .map(|i| {
                let rng = create_rng(base_seed.wrapping_add(i as u64));
                AgentRun::start(problem, config, AgentId(i), rng)
            })
            .collect::<SearchResult<Vec<_>>>()?;
        tracing::info!(base_seed, "agents initialized");

        if config.parallel {
            run_parallel(problem, config, board, &mut workers)?;
        } else {
            run_round_robin(problem, config, board, &mut workers)?;
        }

        let agents: Vec<AgentReport> = workers.iter().map(AgentRun::report).collect();
        let evaluations: u64 = agents.iter().map(|a| a.evaluations).sum();

        let global = board.get();
        let (best, best_cost, best_agent) = match global.route {
            Some(route) => (route, global.cost, global.agent),
            // No cycle ran: fall back to the cheapest starting route.
            None => workers
                .iter()
                .filter_map(|w| {
                    w.agent
                        .beliefs()
                        .p_best()
                        .map(|p| (p.route.clone(), p.cost, Some(w.agent.id())))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .ok_or_else(|| SearchError::InvalidConfig("swarm has no agents".into()))?,
        };

        tracing::info!(best_cost, evaluations, "swarm finished");
        Ok(SwarmResult {
            best,
            best_cost,
            best_agent,
            evaluations,
            agents,
        })
    }
}

/// One agent with its private generator and evaluation counter.
struct AgentRun<R> {
    agent: Agent,
    rng: R,
    evaluations: EvaluationCounter,
    history: Vec<f64>,
}

impl<R: Rng> AgentRun<R> {
    fn start<P: RouteProblem>(
        problem: &P,
        config: &SwarmConfig,
        id: AgentId,
        mut rng: R,
    ) -> SearchResult<Self> {
        let mut evaluations = EvaluationCounter::new();
        let initial = construct_initial_solution(
            problem,
            &mut rng,
            config.construction_attempts,
            &mut evaluations,
        )?;
        tracing::debug!(agent = %id, cost = initial.cost, "initial route");

        let mut agent = Agent::new(id, config.agent.clone());
        agent.initialize(initial);
        Ok(Self {
            agent,
            rng,
            evaluations,
            history: Vec::with_capacity(config.max_cycles),
        })
    }

    fn can_continue(&self, config: &SwarmConfig) -> bool {
        self.agent.cycles() < config.max_cycles
            && config
                .max_evaluations
                .map_or(true, |limit| self.evaluations.count() < limit)
    }

    fn step<P: RouteProblem>(&mut self, problem: &P, board: &Blackboard) -> SearchResult<()> {
        let report = self
            .agent
            .run_cycle(problem, board, &mut self.rng, &mut self.evaluations)?;
        self.history.push(report.solution.cost);
        tracing::debug!(
            agent = %self.agent.id(),
            cycle = self.agent.cycles(),
            current = report.solution.cost,
            p_best = self.agent.beliefs().p_best().map_or(f64::INFINITY, |p| p.cost),
            g_best = board.get().cost,
            "cycle complete"
        );
        Ok(())
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn run_to_end<P: RouteProblem>(
        &mut self,
        problem: &P,
        config: &SwarmConfig,
        board: &Blackboard,
    ) -> SearchResult<()> {
        while self.can_continue(config) {
            self.step(problem, board)?;
        }
        Ok(())
    }

    fn report(&self) -> AgentReport {
        let beliefs = self.agent.beliefs();
        AgentReport {
            agent: self.agent.id(),
            cycles: self.agent.cycles(),
            evaluations: self.evaluations.count(),
            current_cost: beliefs.current().map_or(f64::INFINITY, |s| s.cost),
            p_best_cost: beliefs.p_best().map_or(f64::INFINITY, |s| s.cost),
            action_stats: beliefs
                .actions()
                .filter_map(|a| beliefs.action_stats(a).ok().map(|s| (a, s.clone())))
                .collect(),
            relink_weights: *beliefs.relink_weights(),
            cost_history: self.history.clone(),
        }
    }
}

#[cfg(feature = "parallel")]
fn run_parallel<P, R>(
    problem: &P,
    config: &SwarmConfig,
    board: &Blackboard,
    workers: &mut [AgentRun<R>],
) -> SearchResult<()>
where
    P: RouteProblem,
    R: Rng + Send,
{
    workers
        .par_iter_mut()
        .try_for_each(|w| w.run_to_end(problem, config, board))
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<P, R>(
    problem: &P,
    config: &SwarmConfig,
    board: &Blackboard,
    workers: &mut [AgentRun<R>],
) -> SearchResult<()>
where
    P: RouteProblem,
    R: Rng + Send,
{
    run_round_robin(problem, config, board, workers)
}

/// One cycle per agent per round until every agent is out of budget.
fn run_round_robin<P, R>(
    problem: &P,
    config: &SwarmConfig,
    board: &Blackboard,
    workers: &mut [AgentRun<R>],
) -> SearchResult<()>
where
    P: RouteProblem,
    R: Rng,
{
    loop {
        let mut progressed = false;
        for worker in workers.iter_mut() {
            if worker.can_continue(config) {
                worker.step(problem, board)?;
                progressed = true;
            }
        }
        if !progressed {
            return Ok(());
        }
    }
}
