//! Variable Neighborhood Search (VNS).
//!
//! Wraps [`crate::vnd`] with a diversification layer. At each step a
//! random feasible neighbor in the current neighborhood is drawn
//! (shaking) and then descended with VND. If that improves the current
//! route, the search resets to the first neighborhood; otherwise it moves
//! to the next one.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;

pub use config::VnsConfig;
pub use runner::{VnsResult, VnsRunner};
