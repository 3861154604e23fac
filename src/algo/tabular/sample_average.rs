use crate::{
    agent::Agent,
    env::Environment,
    error::{Error, Result},
    exp::Exp,
    exploration::EpsilonGreedy,
    hpo::{ParamValue, Params},
};

use super::{ensure_action, ensure_finite};

/// Per-action value estimates and selection counts for a stateless problem
///
/// Values are updated with the incremental sample average:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / n
///
/// where n is the number of times the action has been selected, including this one.
/// This is the running mean of every reward seen for the action, kept in constant memory.
/// After the first update the initial value no longer contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValueTable {
    values: Vec<f64>,
    counts: Vec<u64>,
    initial: f64,
}

impl ActionValueTable {
    /// Initialize a table of `size` actions, each valued at `initial`
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            values: vec![initial; size],
            counts: vec![0; size],
            initial,
        }
    }

    /// Number of actions in the table
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Change the value used by the next [`reset`](Self::reset)
    pub fn set_initial(&mut self, initial: f64) {
        self.initial = initial;
    }

    /// Refill every value with the initial value and zero every count
    pub fn reset(&mut self) {
        self.values.fill(self.initial);
        self.counts.fill(0);
    }

    /// The current estimate for `action`
    pub fn value(&self, action: usize) -> Result<f64> {
        ensure_action(action, self.size())?;
        Ok(self.values[action])
    }

    /// The current estimate of every action, indexed by action
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of times `action` has been selected
    pub fn count(&self, action: usize) -> Result<u64> {
        ensure_action(action, self.size())?;
        Ok(self.counts[action])
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Record a selection of `action` and fold `reward` into its estimate
    pub fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        ensure_action(action, self.size())?;
        self.counts[action] += 1;
        let n = self.counts[action] as f64;
        self.values[action] += (reward - self.values[action]) / n;
        Ok(())
    }
}

/// Configuration for the [`SampleAverageAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleAverageAgentConfig {
    /// Exploration rate, in `[0,1]`
    ///
    /// **Default**: `0.1`
    pub epsilon: f64,
    /// Value of every action before it has been tried. Set it high for optimistic initial values.
    ///
    /// **Default**: `0.0`
    pub action_value_initial: f64,
    /// Seed for the exploration policy, or `None` to seed from OS entropy
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for SampleAverageAgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            action_value_initial: 0.0,
            seed: None,
        }
    }
}

/// The simplest tabular agent, for bandit problems
///
/// The environment state is ignored. Every action keeps a sample-average estimate in an
/// [`ActionValueTable`] and actions are chosen epsilon-greedily from those estimates.
#[derive(Debug, Clone)]
pub struct SampleAverageAgent {
    table: ActionValueTable,
    policy: EpsilonGreedy,
    config: SampleAverageAgentConfig,
}

impl SampleAverageAgent {
    /// Initialize a new `SampleAverageAgent` for a given environment
    ///
    /// **Errors** if `epsilon` is not in `[0,1]`, `action_value_initial` is not finite, or
    /// the environment has no actions
    pub fn new<E: Environment>(env: &E, config: SampleAverageAgentConfig) -> Result<Self> {
        Self::with_action_space(env.action_space_size(), config)
    }

    /// Initialize a new `SampleAverageAgent` with an explicit action space size
    pub fn with_action_space(size: usize, config: SampleAverageAgentConfig) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfiguration {
                name: "action_space_size".to_string(),
                reason: "Must be at least 1.".to_string(),
            });
        }
        ensure_finite("action_value_initial", config.action_value_initial)?;
        let policy = EpsilonGreedy::from_seed(config.epsilon, config.seed)?;
        Ok(Self {
            table: ActionValueTable::new(size, config.action_value_initial),
            policy,
            config,
        })
    }

    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    pub fn config(&self) -> &SampleAverageAgentConfig {
        &self.config
    }

    /// Estimated value of `action`
    pub fn value(&self, action: usize) -> Result<f64> {
        self.table.value(action)
    }

    /// Estimated value of every action, indexed by action
    pub fn values(&self) -> &[f64] {
        self.table.values()
    }
}

impl<E: Environment> Agent<E> for SampleAverageAgent {
    fn action_space_size(&self) -> usize {
        self.table.size()
    }

    fn choose_action(&mut self, _state: &E::State) -> usize {
        self.policy.select(self.table.values())
    }

    fn learn(&mut self, exp: Exp<'_, E::State>) -> Result<()> {
        self.table.update(exp.action, exp.reward)
    }

    fn reset(&mut self) {
        self.table.set_initial(self.config.action_value_initial);
        self.table.reset();
    }
}

impl Params for SampleAverageAgent {
    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match name {
            "epsilon" => {
                let epsilon = value.require_float(name)?;
                self.policy.set_epsilon(epsilon)?;
                self.config.epsilon = epsilon;
            }
            "action_value_initial" => {
                let initial = value.require_float(name)?;
                ensure_finite(name, initial)?;
                self.config.action_value_initial = initial;
            }
            _ => return Err(Error::UnknownParameter(name.to_string())),
        }
        Ok(())
    }
}
