//! Iterated Local Search (ILS).
//!
//! Descends once with VND, then repeatedly perturbs the accepted route
//! with a few random swaps and descends again. A descent result is
//! accepted only if it beats the best cost seen so far ("better-only"
//! acceptance); otherwise the search continues from the previous route.
//!
//! # References
//!
//! - Lourenço, H. R., Martin, O. C. & Stützle, T. (2003). "Iterated Local
//!   Search", *Handbook of Metaheuristics*, 320-353.

mod config;
mod runner;

pub use config::IlsConfig;
pub use runner::{perturb, IlsResult, IlsRunner};
