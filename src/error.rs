//! Error type shared by every search component.
//!
//! Only caller-contract violations and construction exhaustion surface as
//! errors. Infeasible candidates met during a search are discarded where
//! they occur and never reach this type.

use std::fmt;

use crate::agent::{AgentId, Metaheuristic};

/// Errors raised by the search components.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A search was started from a route that is not feasible.
    InfeasibleStart {
        /// The component that rejected the route.
        stage: &'static str,
    },
    /// Path-relinking target is not a permutation of the origin's nodes.
    TargetMismatch,
    /// An agent cycle was run before the agent received a starting solution.
    UninitializedAgent {
        /// The offending agent.
        agent: AgentId,
    },
    /// The agent has no registered metaheuristics to choose from.
    EmptyActionSet,
    /// A metaheuristic was referenced that is not in the agent's active set.
    UnregisteredAction {
        /// The agent whose registry was consulted.
        agent: AgentId,
        /// The missing action.
        action: Metaheuristic,
    },
    /// No feasible starting route was found within the attempt budget.
    ConstructionExhausted {
        /// Number of construction attempts made.
        attempts: usize,
    },
    /// The problem description is malformed.
    InvalidInstance(String),
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InfeasibleStart { stage } => {
                write!(f, "{stage} received an infeasible initial route")
            }
            SearchError::TargetMismatch => {
                write!(f, "path-relinking target does not visit the same nodes as the origin")
            }
            SearchError::UninitializedAgent { agent } => {
                write!(f, "{agent} has no initial solution")
            }
            SearchError::EmptyActionSet => write!(f, "no actions available to select"),
            SearchError::UnregisteredAction { agent, action } => {
                write!(f, "action '{action}' is not registered for {agent}")
            }
            SearchError::ConstructionExhausted { attempts } => write!(
                f,
                "could not generate a feasible route after {attempts} attempts"
            ),
            SearchError::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            SearchError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Result alias used throughout the crate.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SearchError::InfeasibleStart { stage: "VND" };
        assert_eq!(err.to_string(), "VND received an infeasible initial route");

        let err = SearchError::UnregisteredAction {
            agent: AgentId(3),
            action: Metaheuristic::Ils,
        };
        assert_eq!(err.to_string(), "action 'ILS' is not registered for agent_3");

        let err = SearchError::ConstructionExhausted { attempts: 100 };
        assert!(err.to_string().contains("100 attempts"));
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&SearchError::EmptyActionSet);
    }
}
