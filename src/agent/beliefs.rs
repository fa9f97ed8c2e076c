//! What an agent knows about its actions and its own search state.
//!
//! Action statistics play the role of adaptive operator weights: every
//! execution is recorded, strict improvements count as successes, and the
//! blended score drives both greedy and roulette decisions.
//!
//! # References
//!
//! - Ropke, S. & Pisinger, D. (2006). "An adaptive large neighborhood search
//!   heuristic for the pickup and delivery problem with time windows",
//!   *Transportation Science* 40(4), 455-472.

use std::fmt;

use rand::Rng;

use super::action::Metaheuristic;
use crate::error::{SearchError, SearchResult};
use crate::problem::Solution;

/// Score floor added to every action so untried actions stay selectable.
pub const DEFAULT_SCORE_FLOOR: f64 = 1.0;

/// Identifier of one agent in a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{}", self.0)
    }
}

/// Running statistics for one action.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionStats {
    /// Times the action was executed.
    pub times_selected: u64,
    /// Executions that strictly lowered the cost.
    pub times_success: u64,
    /// Sum of cost reductions over successful executions.
    pub total_improvement: f64,
    /// `old_cost - new_cost` of the latest execution (may be zero or negative).
    pub last_improvement: f64,
}

impl ActionStats {
    /// Fraction of executions that improved; 0 before the first one.
    pub fn success_rate(&self) -> f64 {
        if self.times_selected == 0 {
            return 0.0;
        }
        self.times_success as f64 / self.times_selected as f64
    }

    /// Mean cost reduction per successful execution.
    pub fn avg_improvement(&self) -> f64 {
        if self.times_success == 0 {
            return 0.0;
        }
        self.total_improvement / self.times_success as f64
    }

    /// Blended score: `10 * success_rate + times_success + avg_improvement / 100 + floor`.
    ///
    /// The success rate decays with every unsuccessful execution, so the
    /// score moves even when nothing improves.
    pub fn score(&self, floor: f64) -> f64 {
        self.success_rate() * 10.0
            + self.times_success as f64
            + self.avg_improvement() / 100.0
            + floor
    }

    fn record(&mut self, old_cost: f64, new_cost: f64) {
        self.times_selected += 1;
        let improvement = old_cost - new_cost;
        self.last_improvement = improvement;
        if improvement > 0.0 {
            self.times_success += 1;
            self.total_improvement += improvement;
        }
    }
}

/// Probabilities of relinking toward the personal or the global best.
///
/// After each relink the side that was used moves by `step`: up if the
/// relink improved on its origin, down otherwise, and the other side takes
/// the complement. Once either side reaches 1.0 the weights freeze.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelinkTargetWeights {
    pub p_best: f64,
    pub g_best: f64,
    pub step: f64,
}

impl Default for RelinkTargetWeights {
    fn default() -> Self {
        Self {
            p_best: 0.9,
            g_best: 0.1,
            step: 0.05,
        }
    }
}

impl RelinkTargetWeights {
    /// True once either probability has saturated.
    pub fn is_frozen(&self) -> bool {
        self.p_best >= 1.0 || self.g_best >= 1.0
    }

    /// Draws a target side; true means the personal best.
    pub fn choose_personal<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < self.p_best
    }

    /// Applies the outcome of one relink toward the chosen side.
    pub fn update(&mut self, used_personal: bool, improved: bool) {
        if self.is_frozen() {
            return;
        }
        let delta = if improved { self.step } else { -self.step };
        if used_personal {
            self.p_best = (self.p_best + delta).clamp(0.0, 1.0);
            self.g_best = 1.0 - self.p_best;
        } else {
            self.g_best = (self.g_best + delta).clamp(0.0, 1.0);
            self.p_best = 1.0 - self.g_best;
        }
    }
}

/// Per-agent belief store.
///
/// Actions are kept in registration order; that order breaks ties in
/// [`AgentBeliefs::best_action`] and fixes the roulette layout.
#[derive(Debug, Clone)]
pub struct AgentBeliefs {
    agent: AgentId,
    actions: Vec<(Metaheuristic, ActionStats)>,
    current: Option<Solution>,
    p_best: Option<Solution>,
    relink_weights: RelinkTargetWeights,
}

impl AgentBeliefs {
    /// Creates beliefs for `actions`; repeated entries after the first are
    /// ignored.
    pub fn new(agent: AgentId, actions: &[Metaheuristic]) -> Self {
        let mut registered: Vec<(Metaheuristic, ActionStats)> = Vec::with_capacity(actions.len());
        for &action in actions {
            if !registered.iter().any(|(a, _)| *a == action) {
                registered.push((action, ActionStats::default()));
            }
        }
        Self {
            agent,
            actions: registered,
            current: None,
            p_best: None,
            relink_weights: RelinkTargetWeights::default(),
        }
    }

    pub fn with_relink_weights(mut self, weights: RelinkTargetWeights) -> Self {
        self.relink_weights = weights;
        self
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Registered actions in registration order.
    pub fn actions(&self) -> impl Iterator<Item = Metaheuristic> + '_ {
        self.actions.iter().map(|(a, _)| *a)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn is_registered(&self, action: Metaheuristic) -> bool {
        self.actions.iter().any(|(a, _)| *a == action)
    }

    /// Records one execution of `action` that moved the cost from
    /// `old_cost` to `new_cost`.
    pub fn update_after_action(
        &mut self,
        action: Metaheuristic,
        old_cost: f64,
        new_cost: f64,
    ) -> SearchResult<()> {
        let agent = self.agent;
        let stats = self
            .actions
            .iter_mut()
            .find(|(a, _)| *a == action)
            .map(|(_, s)| s)
            .ok_or(SearchError::UnregisteredAction { agent, action })?;
        stats.record(old_cost, new_cost);
        Ok(())
    }

    pub fn action_stats(&self, action: Metaheuristic) -> SearchResult<&ActionStats> {
        self.actions
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, s)| s)
            .ok_or(SearchError::UnregisteredAction {
                agent: self.agent,
                action,
            })
    }

    /// Every action's score with `floor` added, in registration order.
    pub fn action_scores(&self, floor: f64) -> Vec<(Metaheuristic, f64)> {
        self.actions
            .iter()
            .map(|(a, s)| (*a, s.score(floor)))
            .collect()
    }

    /// Highest-scoring action; the earliest registered wins ties.
    pub fn best_action(&self) -> SearchResult<Metaheuristic> {
        let mut best: Option<(Metaheuristic, f64)> = None;
        for (action, score) in self.action_scores(DEFAULT_SCORE_FLOOR) {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((action, score)),
            }
        }
        best.map(|(a, _)| a).ok_or(SearchError::EmptyActionSet)
    }

    pub fn current(&self) -> Option<&Solution> {
        self.current.as_ref()
    }

    pub fn update_current_solution(&mut self, solution: Solution) {
        self.current = Some(solution);
    }

    pub fn p_best(&self) -> Option<&Solution> {
        self.p_best.as_ref()
    }

    /// Replaces the personal best if `candidate` is strictly cheaper.
    pub fn try_update_pbest(&mut self, candidate: &Solution) -> bool {
        let improves = self
            .p_best
            .as_ref()
            .map_or(true, |best| candidate.cost < best.cost);
        if improves {
            self.p_best = Some(candidate.clone());
        }
        improves
    }

    pub fn relink_weights(&self) -> &RelinkTargetWeights {
        &self.relink_weights
    }

    pub fn relink_weights_mut(&mut self) -> &mut RelinkTargetWeights {
        &mut self.relink_weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beliefs() -> AgentBeliefs {
        AgentBeliefs::new(AgentId(0), &Metaheuristic::ALL)
    }

    #[test]
    fn test_success_accounting() {
        let mut b = beliefs();
        b.update_after_action(Metaheuristic::Vnd, 100.0, 80.0).unwrap();

        let stats = b.action_stats(Metaheuristic::Vnd).unwrap();
        assert_eq!(stats.times_selected, 1);
        assert_eq!(stats.times_success, 1);
        assert!((stats.total_improvement - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_is_not_success() {
        let mut b = beliefs();
        b.update_after_action(Metaheuristic::Vnd, 100.0, 80.0).unwrap();
        b.update_after_action(Metaheuristic::Vnd, 80.0, 80.0).unwrap();

        let stats = b.action_stats(Metaheuristic::Vnd).unwrap();
        assert_eq!(stats.times_selected, 2);
        assert_eq!(stats.times_success, 1);
        assert!((stats.total_improvement - 20.0).abs() < 1e-12);
        assert_eq!(stats.last_improvement, 0.0);
        assert!((stats.success_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_worsening_records_negative_last_improvement() {
        let mut b = beliefs();
        b.update_after_action(Metaheuristic::Ils, 50.0, 60.0).unwrap();

        let stats = b.action_stats(Metaheuristic::Ils).unwrap();
        assert_eq!(stats.times_success, 0);
        assert_eq!(stats.total_improvement, 0.0);
        assert_eq!(stats.last_improvement, -10.0);
    }

    #[test]
    fn test_score_formula() {
        let stats = ActionStats {
            times_selected: 4,
            times_success: 2,
            total_improvement: 300.0,
            last_improvement: 0.0,
        };
        // 0.5 * 10 + 2 + 150 / 100 + 1
        assert!((stats.score(1.0) - 9.5).abs() < 1e-12);
        assert_eq!(ActionStats::default().score(1.0), 1.0);
    }

    #[test]
    fn test_best_action_tie_breaks_by_registration_order() {
        let b = AgentBeliefs::new(AgentId(0), &[Metaheuristic::Vns, Metaheuristic::Vnd]);
        assert_eq!(b.best_action().unwrap(), Metaheuristic::Vns);

        let b = beliefs();
        assert_eq!(b.best_action().unwrap(), Metaheuristic::Vnd);
    }

    #[test]
    fn test_best_action_follows_scores() {
        let mut b = beliefs();
        b.update_after_action(Metaheuristic::Vns, 10.0, 5.0).unwrap();
        b.update_after_action(Metaheuristic::Vnd, 10.0, 10.0).unwrap();
        assert_eq!(b.best_action().unwrap(), Metaheuristic::Vns);
    }

    #[test]
    fn test_empty_registry() {
        let b = AgentBeliefs::new(AgentId(1), &[]);
        assert_eq!(b.best_action().unwrap_err(), SearchError::EmptyActionSet);
    }

    #[test]
    fn test_unregistered_action() {
        let mut b = AgentBeliefs::new(AgentId(3), &[Metaheuristic::Vnd]);
        let err = b
            .update_after_action(Metaheuristic::Ils, 1.0, 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::UnregisteredAction {
                agent: AgentId(3),
                action: Metaheuristic::Ils
            }
        );
        assert!(b.action_stats(Metaheuristic::Ils).is_err());
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let b = AgentBeliefs::new(
            AgentId(0),
            &[Metaheuristic::Vnd, Metaheuristic::Vnd, Metaheuristic::Ils],
        );
        assert_eq!(b.action_count(), 2);
        assert_eq!(
            b.actions().collect::<Vec<_>>(),
            vec![Metaheuristic::Vnd, Metaheuristic::Ils]
        );
    }

    #[test]
    fn test_try_update_pbest_strict() {
        let mut b = beliefs();
        assert!(b.try_update_pbest(&Solution::new(vec![0, 1, 0], 10.0)));
        assert!(!b.try_update_pbest(&Solution::new(vec![0, 2, 0], 10.0)));
        assert!(b.try_update_pbest(&Solution::new(vec![0, 3, 0], 9.0)));
        assert_eq!(b.p_best().unwrap().route, vec![0, 3, 0]);
    }

    #[test]
    fn test_relink_weights_move_and_freeze() {
        let mut w = RelinkTargetWeights::default();
        w.update(true, true);
        assert!((w.p_best - 0.95).abs() < 1e-12);
        assert!((w.g_best - 0.05).abs() < 1e-12);

        w.update(false, false);
        assert!((w.g_best - 0.0).abs() < 1e-12);
        assert!((w.p_best - 1.0).abs() < 1e-12);
        assert!(w.is_frozen());

        let frozen = w;
        w.update(true, false);
        assert_eq!(w, frozen);
    }

    #[test]
    fn test_relink_weights_global_side_complement() {
        let mut w = RelinkTargetWeights::default();
        w.update(false, true);
        assert!((w.g_best - 0.15).abs() < 1e-12);
        assert!((w.p_best - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_agent_id_display() {
        assert_eq!(AgentId(7).to_string(), "agent_7");
    }
}
