use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{ensure_interval, error::Result};

use super::Choice;

/// Epsilon greedy exploration policy with a constant epsilon threshold
///
/// The policy owns its random number generator so that runs can be reproduced from a seed.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy with an explicit random number generator
    ///
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64, rng: StdRng) -> Result<Self> {
        ensure_interval!(epsilon, 0.0, 1.0);
        Ok(Self { epsilon, rng })
    }

    /// Initialize epsilon greedy policy from an optional seed, falling back to OS entropy
    pub fn from_seed(epsilon: f64, seed: Option<u64>) -> Result<Self> {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::new(epsilon, rng)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// **Errors** if `epsilon` is not in the interval `[0,1]`, leaving the current value in place
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        ensure_interval!(epsilon, 0.0, 1.0);
        self.epsilon = epsilon;
        Ok(())
    }

    /// Decide whether the next action explores or exploits
    pub fn choose(&mut self) -> Choice {
        if self.rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Select an action from the estimated value of every action, indexed by action
    ///
    /// Exploration draws uniformly from the whole action space, so it may pick the greedy action too.
    ///
    /// **Panics** if `action_values` is empty
    pub fn select(&mut self, action_values: &[f64]) -> usize {
        assert!(
            !action_values.is_empty(),
            "There is always at least one action available"
        );
        match self.choose() {
            Choice::Explore => self.rng.gen_range(0..action_values.len()),
            Choice::Exploit => greedy(action_values),
        }
    }
}

/// Index of the maximal value. Ties go to the lowest index.
///
/// NaN values are skipped. If every value is NaN, the first index is returned.
pub fn greedy(action_values: &[f64]) -> usize {
    action_values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map_or(0, |(i, _)| i)
}
