//! Variable Neighborhood Descent (VND).
//!
//! Deterministic steepest descent over an ordered list of neighborhoods.
//! Each step evaluates every neighbor in the current neighborhood and
//! moves to the best strictly improving feasible one, restarting from the
//! first neighborhood. When a neighborhood yields no improvement the next
//! one is tried; the search ends at a route that is locally optimal with
//! respect to all of them.
//!
//! # References
//!
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;

pub use config::VndConfig;
pub use runner::{VndResult, VndRunner};
