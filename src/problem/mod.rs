//! The routing problem seen by the search: routes, evaluation, and the
//! capacitated pickup/delivery instance.
//!
//! The search components are generic over [`RouteProblem`], the domain
//! oracle. [`Instance`] is the concrete single-vehicle problem with a
//! running-load constraint: each stop changes the vehicle load by its
//! boardings minus alightings, and the load must stay within
//! `[0, capacity]` at every prefix of the route.

mod construction;
mod instance;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use construction::{construct_initial_solution, DEFAULT_CONSTRUCTION_ATTEMPTS};
pub use instance::{Instance, Node};
pub use types::{Evaluation, EvaluationCounter, NodeId, Route, RouteProblem, Solution, DEPOT};
