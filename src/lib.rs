//! Cooperative multi-agent metaheuristic search for capacitated
//! permutation routing.
//!
//! A route is a depot-anchored permutation of the required nodes; it is
//! feasible when every node is visited once and the running vehicle load
//! stays within capacity. The crate provides:
//!
//! - **Neighborhoods**: swap and segment reversal over interior positions.
//! - **Variable Neighborhood Descent (VND)**: deterministic steepest descent
//!   across an ordered neighborhood list.
//! - **Variable Neighborhood Search (VNS)**: random shaking followed by VND.
//! - **Iterated Local Search (ILS)**: random multi-swap perturbation
//!   followed by VND, accepting only improvements.
//! - **Path-relinking**: a directed-swap walk toward an elite route with
//!   opportunistic intensification.
//! - **Agents**: a belief store over the three metaheuristics, a decision
//!   policy (random, greedy, epsilon-roulette), and the cognitive cycle
//!   that ties them to a shared blackboard.
//! - **Swarm**: runs several agents concurrently under cycle and
//!   evaluation budgets.
//!
//! # Architecture
//!
//! Search components only see the problem through the
//! [`problem::RouteProblem`] oracle; [`problem::Instance`] is the concrete
//! pickup/delivery model. Every oracle call takes an explicit
//! [`problem::EvaluationCounter`], and every random decision draws from a
//! caller-supplied generator, so runs are reproducible per agent.
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod agent;
pub mod blackboard;
pub mod error;
pub mod ils;
pub mod neighborhood;
pub mod problem;
pub mod relink;
pub mod swarm;
pub mod vnd;
pub mod vns;

pub use error::{SearchError, SearchResult};
