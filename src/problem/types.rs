//! Route representation and the domain oracle trait.

use rand::Rng;

/// Identifier of a node in the problem instance.
pub type NodeId = usize;

/// A depot-anchored visiting order: `route[0] == route[last] == DEPOT`.
pub type Route = Vec<NodeId>;

/// The fixed depot identifier.
pub const DEPOT: NodeId = 0;

/// Feasibility and cost computed together.
///
/// `cost` is `f64::INFINITY` whenever `feasible` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Whether the route satisfies every constraint.
    pub feasible: bool,
    /// Route cost, or infinity if infeasible.
    pub cost: f64,
}

impl Evaluation {
    /// A feasible evaluation with the given cost.
    pub fn feasible(cost: f64) -> Self {
        Self {
            feasible: true,
            cost,
        }
    }

    /// An infeasible evaluation.
    pub fn infeasible() -> Self {
        Self {
            feasible: false,
            cost: f64::INFINITY,
        }
    }
}

/// A route paired with its cost.
///
/// This is the value every metaheuristic action hands back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// The visiting order.
    pub route: Route,
    /// Its cost.
    pub cost: f64,
}

impl Solution {
    pub fn new(route: Route, cost: f64) -> Self {
        Self { route, cost }
    }
}

/// Counts objective-function evaluations.
///
/// Passed explicitly into every oracle call so that evaluation budgets
/// compose without ambient per-thread state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationCounter {
    count: u64,
}

impl EvaluationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one objective evaluation.
    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Number of evaluations recorded so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Evaluations recorded since `earlier` was copied from this counter.
    pub fn since(&self, earlier: EvaluationCounter) -> u64 {
        self.count.saturating_sub(earlier.count)
    }
}

/// Defines a permutation-routing problem (the domain oracle).
///
/// Implementors describe which routes are admissible and what they cost.
/// The search components never look inside the instance; they only ask
/// this trait.
///
/// # Minimization
///
/// All components minimize [`RouteProblem::cost`].
pub trait RouteProblem: Send + Sync {
    /// The depot that anchors both ends of every route.
    fn depot(&self) -> NodeId {
        DEPOT
    }

    /// Returns true if the route is depot-anchored, visits every required
    /// node exactly once and respects all side constraints.
    fn is_feasible(&self, route: &[NodeId]) -> bool;

    /// Sum of the edge weights along the route.
    fn cost(&self, route: &[NodeId]) -> f64;

    /// Builds one random route, or `None` if the attempt hit a dead end.
    fn random_route<R: Rng>(&self, rng: &mut R) -> Option<Route>;

    /// Evaluates feasibility and cost together.
    ///
    /// The cost is only computed (and counted) for feasible routes.
    fn evaluate(&self, route: &[NodeId], evaluations: &mut EvaluationCounter) -> Evaluation {
        if !self.is_feasible(route) {
            return Evaluation::infeasible();
        }
        evaluations.record();
        Evaluation::feasible(self.cost(route))
    }
}
