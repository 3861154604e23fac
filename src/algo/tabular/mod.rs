pub mod sample_average;
pub mod sarsa;

pub use sample_average::{ActionValueTable, SampleAverageAgent, SampleAverageAgentConfig};
pub use sarsa::{SarsaAgent, SarsaAgentConfig};

use crate::error::{Error, Result};

/// A trait for state types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Clone + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Clone + Eq + std::hash::Hash {}

fn ensure_action(action: usize, size: usize) -> Result<()> {
    if action < size {
        Ok(())
    } else {
        Err(Error::InvalidAction { action, size })
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            name: name.to_string(),
            reason: format!("Must be finite, got {value}."),
        })
    }
}
