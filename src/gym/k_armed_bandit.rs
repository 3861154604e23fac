use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{
    env::{EnvError, Environment, Step},
    error::{self, Error},
    exploration::greedy,
};

/// K-armed bandit environment
///
/// A simple environment with K arms, each of which pays a reward drawn from a normal
/// distribution with unit variance around the arm's mean. The goal is to learn which arm
/// has the highest mean reward.
///
/// An episode is `step_limit` pulls long, one pull by default.
#[derive(Debug, Clone)]
pub struct KArmedBandit {
    means: Vec<f64>,
    step_limit: usize,
    steps: usize,
    rng: StdRng,
}

fn rng_from(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

impl KArmedBandit {
    /// Initialize a new K-armed bandit whose arm means are drawn from N(0,1)
    pub fn new(k: usize, seed: Option<u64>) -> Self {
        let mut rng = rng_from(seed);
        let means: Vec<f64> = (0..k).map(|_| rng.sample(StandardNormal)).collect();
        Self {
            means,
            step_limit: 1,
            steps: 0,
            rng,
        }
    }

    /// Initialize a bandit with fixed arm means
    pub fn with_means(means: impl Into<Vec<f64>>, seed: Option<u64>) -> Self {
        Self {
            means: means.into(),
            step_limit: 1,
            steps: 0,
            rng: rng_from(seed),
        }
    }

    /// Set the number of pulls per episode
    ///
    /// **Errors** with [`Error::InvalidConfiguration`] if `step_limit` is 0
    pub fn with_step_limit(mut self, step_limit: usize) -> error::Result<Self> {
        if step_limit == 0 {
            return Err(Error::InvalidConfiguration {
                name: "step_limit".to_string(),
                reason: "Must be at least 1.".to_string(),
            });
        }
        self.step_limit = step_limit;
        Ok(self)
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// The arm with the highest mean
    pub fn optimal_action(&self) -> Option<usize> {
        (!self.means.is_empty()).then(|| greedy(&self.means))
    }
}

impl Environment for KArmedBandit {
    type State = ();
    type Info = ();

    fn action_space_size(&self) -> usize {
        self.means.len()
    }

    fn reset(&mut self) -> Result<Self::State, EnvError> {
        self.steps = 0;
        Ok(())
    }

    fn step(&mut self, action: usize) -> Result<Step<Self::State, Self::Info>, EnvError> {
        let Some(&mean) = self.means.get(action) else {
            return Err(Box::new(Error::InvalidAction {
                action,
                size: self.means.len(),
            }));
        };
        let noise: f64 = self.rng.sample(StandardNormal);
        self.steps += 1;
        Ok(Step {
            next_state: (),
            reward: mean + noise,
            done: self.steps >= self.step_limit,
            info: (),
        })
    }

    fn render(&self) {
        info!(
            "bandit pull {}/{} over arm means {:?}",
            self.steps + 1,
            self.step_limit,
            self.means
        );
    }
}
