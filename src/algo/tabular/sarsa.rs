use std::collections::HashMap;

use crate::{
    agent::Agent,
    ensure_interval,
    env::Environment,
    error::{Error, Result},
    exp::Exp,
    exploration::EpsilonGreedy,
    hpo::{ParamValue, Params},
};

use super::{ensure_action, ensure_finite, Hashable};

/// Configuration for the [`SarsaAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct SarsaAgentConfig {
    /// Exploration rate, in `[0,1]`
    ///
    /// **Default**: `0.1`
    pub epsilon: f64,
    /// Learning rate, in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub alpha: f64,
    /// Discount factor, in `[0,1]`
    ///
    /// **Default**: `1.0`
    pub gamma: f64,
    /// Default value for state-action pairs that have not been visited yet
    ///
    /// **Default**: `0.0`
    pub action_value_initial: f64,
    /// Seed for the exploration policy, or `None` to seed from OS entropy
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for SarsaAgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            alpha: 0.5,
            gamma: 1.0,
            action_value_initial: 0.0,
            seed: None,
        }
    }
}

/// An entry in the table
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    value: f64,
    count: u64,
}

/// On-policy temporal-difference agent for environments with state
///
/// This agent keeps a value and a selection count for every visited state-action pair.
/// The values are updated using the update rule:
///
/// Q(S,A) = Q(S,A) + α(R + γQ(S',A') - Q(S,A))
///
/// where A' is the action already chosen for the next state S'. On a terminal
/// transition there is no A' and the target is just R.
#[derive(Debug, Clone)]
pub struct SarsaAgent<S: Hashable> {
    table: HashMap<(S, usize), Entry>,
    size: usize,
    policy: EpsilonGreedy,
    config: SarsaAgentConfig,
}

impl<S: Hashable> SarsaAgent<S> {
    /// Initialize a new `SarsaAgent` for a given environment
    ///
    /// **Errors** if `epsilon`, `alpha` or `gamma` is not in `[0,1]`, if
    /// `action_value_initial` is not finite, or if the environment has no actions
    pub fn new<E>(env: &E, config: SarsaAgentConfig) -> Result<Self>
    where
        E: Environment<State = S>,
    {
        let size = env.action_space_size();
        if size == 0 {
            return Err(Error::InvalidConfiguration {
                name: "action_space_size".to_string(),
                reason: "Must be at least 1.".to_string(),
            });
        }
        ensure_interval!(config.alpha, 0.0, 1.0);
        ensure_interval!(config.gamma, 0.0, 1.0);
        ensure_finite("action_value_initial", config.action_value_initial)?;
        let policy = EpsilonGreedy::from_seed(config.epsilon, config.seed)?;
        Ok(Self {
            table: HashMap::new(),
            size,
            policy,
            config,
        })
    }

    pub fn config(&self) -> &SarsaAgentConfig {
        &self.config
    }

    fn entry(&self, state: &S, action: usize) -> Entry {
        self.table
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(Entry {
                value: self.config.action_value_initial,
                count: 0,
            })
    }

    /// Estimated value of taking `action` in `state`
    pub fn value(&self, state: &S, action: usize) -> Result<f64> {
        ensure_action(action, self.size)?;
        Ok(self.entry(state, action).value)
    }

    /// Estimated value of every action in `state`, indexed by action
    pub fn values(&self, state: &S) -> Vec<f64> {
        (0..self.size).map(|a| self.entry(state, a).value).collect()
    }

    /// Number of times `action` has been selected in `state`
    pub fn count(&self, state: &S, action: usize) -> Result<u64> {
        ensure_action(action, self.size)?;
        Ok(self.entry(state, action).count)
    }

    /// Number of state-action pairs visited so far
    pub fn visited(&self) -> usize {
        self.table.len()
    }
}

impl<E, S> Agent<E> for SarsaAgent<S>
where
    E: Environment<State = S>,
    S: Hashable,
{
    fn action_space_size(&self) -> usize {
        self.size
    }

    fn choose_action(&mut self, state: &S) -> usize {
        let values = self.values(state);
        self.policy.select(&values)
    }

    fn learn(&mut self, exp: Exp<'_, S>) -> Result<()> {
        ensure_action(exp.action, self.size)?;
        let next_value = match exp.next_action {
            Some(next_action) => {
                ensure_action(next_action, self.size)?;
                self.entry(exp.next_state, next_action).value
            }
            None => 0.0,
        };

        let SarsaAgentConfig {
            alpha,
            gamma,
            action_value_initial,
            ..
        } = self.config;
        let target = exp.reward + gamma * next_value;

        let entry = self
            .table
            .entry((exp.state.clone(), exp.action))
            .or_insert(Entry {
                value: action_value_initial,
                count: 0,
            });
        entry.count += 1;
        entry.value += alpha * (target - entry.value);
        Ok(())
    }

    fn reset(&mut self) {
        self.table.clear();
    }
}

impl<S: Hashable> Params for SarsaAgent<S> {
    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match name {
            "epsilon" => {
                let epsilon = value.require_float(name)?;
                self.policy.set_epsilon(epsilon)?;
                self.config.epsilon = epsilon;
            }
            "alpha" => {
                let alpha = value.require_float(name)?;
                ensure_interval!(alpha, 0.0, 1.0);
                self.config.alpha = alpha;
            }
            "gamma" => {
                let gamma = value.require_float(name)?;
                ensure_interval!(gamma, 0.0, 1.0);
                self.config.gamma = gamma;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::tests::MockEnv;

    fn agent(config: SarsaAgentConfig) -> SarsaAgent<usize> {
        SarsaAgent::new(&MockEnv::new(vec![0.0, 0.0], 3), config).unwrap()
    }

    fn learn(agent: &mut SarsaAgent<usize>, exp: Exp<'_, usize>) {
        Agent::<MockEnv>::learn(agent, exp).unwrap();
    }

    #[test]
    fn sarsa_td_update() {
        let mut agent = agent(SarsaAgentConfig {
            alpha: 0.5,
            gamma: 0.9,
            seed: Some(0),
            ..Default::default()
        });

        learn(
            &mut agent,
            Exp {
                state: &1,
                action: 0,
                reward: 4.0,
                next_state: &2,
                next_action: None,
                done: true,
            },
        );
        assert_eq!(agent.value(&1, 0).unwrap(), 2.0, "terminal target is the reward");

        learn(
            &mut agent,
            Exp {
                state: &0,
                action: 1,
                reward: -1.0,
                next_state: &1,
                next_action: Some(0),
                done: false,
            },
        );
        // target = -1 + 0.9 * 2 = 0.8
        assert!((agent.value(&0, 1).unwrap() - 0.4).abs() < 1e-12, "bootstrapped target");
        assert_eq!(agent.count(&0, 1).unwrap(), 1, "selection counted");
        assert_eq!(agent.count(&0, 0).unwrap(), 0, "other action untouched");
        assert_eq!(agent.visited(), 2);

        Agent::<MockEnv>::reset(&mut agent);
        assert_eq!(agent.visited(), 0, "reset clears the table");
    }

    #[test]
    fn sarsa_invalid_action() {
        let mut agent = agent(Default::default());
        let result = Agent::<MockEnv>::learn(
            &mut agent,
            Exp {
                state: &0,
                action: 0,
                reward: 0.0,
                next_state: &1,
                next_action: Some(5),
                done: false,
            },
        );
        assert!(matches!(result, Err(Error::InvalidAction { action: 5, size: 2 })));
        assert_eq!(agent.visited(), 0, "failed update leaves the table alone");
        assert!(agent.value(&0, 2).is_err());
    }

    #[test]
    fn sarsa_params() {
        let mut agent = agent(Default::default());
        agent.set_param("alpha", &ParamValue::Float(0.25)).unwrap();
        agent.set_param("gamma", &ParamValue::Int(1)).unwrap();
        assert_eq!(agent.config().alpha, 0.25);
        assert_eq!(agent.config().gamma, 1.0);
        assert!(agent.set_param("gamma", &ParamValue::Float(1.5)).is_err());
        assert!(agent.set_param("nb_episodes", &ParamValue::Int(3)).is_err());

        agent
            .set_param("action_value_initial", &ParamValue::Float(-3.0))
            .unwrap();
        assert_eq!(agent.values(&9), [-3.0, -3.0], "unvisited pairs use initial value");
    }
}
