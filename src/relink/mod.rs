//! Path-relinking between an agent's position and an elite route.
//!
//! Walks interior positions left to right and, wherever the working
//! route disagrees with the target, performs a directed swap that puts
//! the target's node in place. Every intermediate route is evaluated; the
//! first feasible one that beats the origin is handed to an intensifier
//! callback (opportunistic intensification) and its result returned.
//!
//! # References
//!
//! - Glover, F., Laguna, M. & Martí, R. (2000). "Fundamentals of scatter
//!   search and path relinking", *Control and Cybernetics* 29(3), 653-684.

mod config;
mod runner;

pub use config::RelinkConfig;
pub use runner::{RelinkOutcome, RelinkResult, RelinkRunner};
