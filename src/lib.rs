/// Agent trait and the episode loop
pub mod agent;

/// Implemented learning algorithms
pub mod algo;

/// Error types
pub mod error;

/// Environment
pub mod env;

/// Transitions
pub mod exp;

/// Exploration policies
pub mod exploration;

/// Hyperparameter search: parameter sets, grid search over a search space, and an
/// exhaustive sweep that keeps the best scoring combination
pub mod hpo;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

pub use agent::{Agent, AgentLoop, LoopConfig};
pub use error::{Error, Result};
