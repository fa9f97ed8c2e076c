//! Shared global best.
//!
//! The blackboard is the only state agents share. It is constructed once
//! by the orchestrator and handed to every agent by reference. Both the
//! comparison and the write in [`Blackboard::try_update`] happen under one
//! lock, so concurrent submissions never lose the minimum.

use std::sync::{Mutex, MutexGuard};

use crate::agent::AgentId;
use crate::problem::{NodeId, Route, Solution};

/// Snapshot of the global best.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalBest {
    /// Best route found by any agent, if any.
    pub route: Option<Route>,
    /// Its cost, or infinity while empty.
    pub cost: f64,
    /// The agent that submitted it.
    pub agent: Option<AgentId>,
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self {
            route: None,
            cost: f64::INFINITY,
            agent: None,
        }
    }
}

impl GlobalBest {
    pub fn is_empty(&self) -> bool {
        self.route.is_none()
    }

    /// The stored route and cost as a solution.
    pub fn solution(&self) -> Option<Solution> {
        self.route
            .as_ref()
            .map(|route| Solution::new(route.clone(), self.cost))
    }
}

/// Lock-guarded global best shared by all agents.
#[derive(Debug, Default)]
pub struct Blackboard {
    best: Mutex<GlobalBest>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere cannot leave the record half-written: every
    // mutation is a single assignment made after the comparison.
    fn lock(&self) -> MutexGuard<'_, GlobalBest> {
        self.best
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores `route` if `cost` is strictly below the current best.
    ///
    /// Returns whether the blackboard changed.
    pub fn try_update(&self, route: &[NodeId], cost: f64, agent: AgentId) -> bool {
        let mut best = self.lock();
        if cost < best.cost {
            *best = GlobalBest {
                route: Some(route.to_vec()),
                cost,
                agent: Some(agent),
            };
            true
        } else {
            false
        }
    }

    /// A copy of the current global best.
    pub fn get(&self) -> GlobalBest {
        self.lock().clone()
    }

    /// Clears back to the empty state.
    pub fn reset(&self) {
        *self.lock() = GlobalBest::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_blackboard() {
        let board = Blackboard::new();
        let best = board.get();
        assert!(best.is_empty());
        assert!(best.cost.is_infinite());
        assert!(best.agent.is_none());
        assert!(best.solution().is_none());
    }

    #[test]
    fn test_strict_improvement_only() {
        let board = Blackboard::new();
        assert!(board.try_update(&[0, 1, 2, 0], 10.0, AgentId(0)));
        assert!(!board.try_update(&[0, 2, 1, 0], 10.0, AgentId(1)));
        assert!(!board.try_update(&[0, 2, 1, 0], 11.0, AgentId(1)));

        let best = board.get();
        assert_eq!(best.route, Some(vec![0, 1, 2, 0]));
        assert_eq!(best.agent, Some(AgentId(0)));

        assert!(board.try_update(&[0, 2, 1, 0], 9.5, AgentId(2)));
        assert_eq!(board.get().agent, Some(AgentId(2)));
    }

    #[test]
    fn test_get_returns_detached_copy() {
        let board = Blackboard::new();
        board.try_update(&[0, 1, 2, 0], 10.0, AgentId(0));

        let mut snapshot = board.get();
        if let Some(route) = snapshot.route.as_mut() {
            route.reverse();
        }
        assert_eq!(board.get().route, Some(vec![0, 1, 2, 0]));
    }

    #[test]
    fn test_reset() {
        let board = Blackboard::new();
        board.try_update(&[0, 1, 0], 1.0, AgentId(0));
        board.reset();
        assert_eq!(board.get(), GlobalBest::default());
        assert!(board.try_update(&[0, 1, 0], 5.0, AgentId(1)));
    }

    #[test]
    fn test_concurrent_updates_keep_minimum() {
        let board = Blackboard::new();
        let threads = 16;
        let per_thread = 200;

        std::thread::scope(|s| {
            for t in 0..threads {
                let board = &board;
                s.spawn(move || {
                    for k in 0..per_thread {
                        // distinct costs; the global minimum is 1.0 from thread 7
                        let cost = 1.0 + ((t + 9) % threads) as f64 + (per_thread - k) as f64 * 100.0;
                        board.try_update(&[0, t, 0], cost, AgentId(t));
                    }
                });
            }
        });

        let best = board.get();
        let min_cost = 1.0 + 100.0;
        assert_eq!(best.cost, min_cost);
        assert_eq!(best.agent, Some(AgentId(7)));
        assert_eq!(best.route, Some(vec![0, 7, 0]));
    }

    proptest! {
        #[test]
        fn prop_blackboard_monotone(costs in proptest::collection::vec(0.0f64..1e6, 1..50)) {
            let board = Blackboard::new();
            let mut previous = f64::INFINITY;
            for (i, &cost) in costs.iter().enumerate() {
                let changed = board.try_update(&[0, 0], cost, AgentId(i));
                let now = board.get().cost;
                prop_assert!(now <= previous);
                prop_assert_eq!(changed, cost < previous);
                previous = now;
            }
            let min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
            prop_assert_eq!(board.get().cost, min);
        }
    }
}
