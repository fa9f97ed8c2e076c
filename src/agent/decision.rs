//! Choosing the next action from the agent's beliefs.

use rand::Rng;

use super::action::Metaheuristic;
use super::beliefs::{AgentBeliefs, DEFAULT_SCORE_FLOOR};
use crate::error::{SearchError, SearchResult};

/// How an agent picks its next action.
///
/// # Examples
///
/// ```
/// use u_metaswarm::agent::DecisionStrategy;
///
/// assert_eq!(DecisionStrategy::default(), DecisionStrategy::Roulette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionStrategy {
    /// Uniform over the registered actions.
    Random,
    /// The currently best-scoring action.
    Greedy,
    /// Epsilon-exploration followed by fitness-proportionate selection
    /// over action scores.
    #[default]
    Roulette,
}

/// Decision policy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionPolicy {
    pub strategy: DecisionStrategy,
    /// Probability of a uniform pick before consulting scores (roulette only).
    pub exploration_rate: f64,
    /// Added to every score before the roulette wheel is built.
    pub score_floor: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            strategy: DecisionStrategy::Roulette,
            exploration_rate: 0.15,
            score_floor: DEFAULT_SCORE_FLOOR,
        }
    }
}

impl DecisionPolicy {
    pub fn with_strategy(mut self, strategy: DecisionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate;
        self
    }

    pub fn with_score_floor(mut self, floor: f64) -> Self {
        self.score_floor = floor;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err("exploration_rate must be in [0, 1]".into());
        }
        if self.score_floor.is_nan() || self.score_floor < 0.0 {
            return Err("score_floor must be non-negative".into());
        }
        Ok(())
    }

    /// Picks the next action.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyActionSet`] if no action is registered.
    pub fn decide<R: Rng>(&self, beliefs: &AgentBeliefs, rng: &mut R) -> SearchResult<Metaheuristic> {
        if beliefs.action_count() == 0 {
            return Err(SearchError::EmptyActionSet);
        }

        match self.strategy {
            DecisionStrategy::Random => uniform(beliefs, rng),
            DecisionStrategy::Greedy => beliefs.best_action(),
            DecisionStrategy::Roulette => {
                if rng.random::<f64>() < self.exploration_rate {
                    return uniform(beliefs, rng);
                }
                let scores = beliefs.action_scores(self.score_floor);
                let weights: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
                match roulette_select(&weights, rng) {
                    Some(idx) => Ok(scores[idx].0),
                    None => uniform(beliefs, rng),
                }
            }
        }
    }
}

fn uniform<R: Rng>(beliefs: &AgentBeliefs, rng: &mut R) -> SearchResult<Metaheuristic> {
    let idx = rng.random_range(0..beliefs.action_count());
    beliefs.actions().nth(idx).ok_or(SearchError::EmptyActionSet)
}

/// Fitness-proportionate pick over `weights`.
///
/// Draws `r` in `[0, total)` and returns the first index whose cumulative
/// weight reaches `r`. Returns `None` when the total is not positive or
/// rounding leaves `r` past the last cumulative sum; callers then fall
/// back to a uniform pick.
pub fn roulette_select<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total.is_nan() || total <= 0.0 {
        return None;
    }

    let roll = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if roll <= cumulative {
            return Some(i);
        }
    }
    None
}
