//! Cooperative search agents.
//!
//! Each agent repeats a fixed cycle:
//!
//! 1. **Decide** which metaheuristic to run from its beliefs
//! 2. **Act**: run it from the current position and re-validate the result
//! 3. **Learn**: record the cost change for the chosen action
//! 4. **Relink** toward an elite route, intensifying with the best-scoring
//!    action as soon as the walk improves
//! 5. Update the personal best, then the shared [`Blackboard`]
//!
//! Agents share nothing but the blackboard; beliefs, position and random
//! state are private to each agent.
//!
//! [`Blackboard`]: crate::blackboard::Blackboard
//!
//! # References
//!
//! - Silva, M. A. L., de Souza, S. R., Souza, M. J. F. & Bazzan, A. L. C.
//!   (2019). "A reinforcement learning-based multi-agent framework applied
//!   for solving routing and scheduling problems", *Expert Systems with
//!   Applications* 131, 148-171.

mod action;
mod beliefs;
mod cycle;
mod decision;

pub use action::{Metaheuristic, MetaheuristicSuite};
pub use beliefs::{ActionStats, AgentBeliefs, AgentId, RelinkTargetWeights, DEFAULT_SCORE_FLOOR};
pub use cycle::{Agent, AgentConfig, CycleReport, RelinkTarget};
pub use decision::{roulette_select, DecisionPolicy, DecisionStrategy};
