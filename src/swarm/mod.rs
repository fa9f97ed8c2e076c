//! Orchestration of a cooperative agent swarm.
//!
//! Builds one starting route per agent, then lets every agent cycle until
//! its cycle count or evaluation budget runs out. Agents meet only at the
//! [`Blackboard`](crate::blackboard::Blackboard).
//!
//! With the `parallel` feature agents run as rayon tasks; otherwise they
//! take turns, one cycle each, on the calling thread.

mod config;
mod runner;

pub use config::SwarmConfig;
pub use runner::{AgentReport, SwarmResult, SwarmRunner};
