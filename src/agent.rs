use log::{debug, trace};

use crate::{
    env::{Environment, Step},
    error::{Error, Result},
    exp::Exp,
    hpo::{ParamSet, ParamValue, Params, Tunable},
};

/// A learner that acts in an [`Environment`]
///
/// Variants differ in how they estimate action values and how they update those
/// estimates. The [`AgentLoop`] drives all of them the same way.
pub trait Agent<E: Environment> {
    /// Number of actions the agent chooses from
    fn action_space_size(&self) -> usize;

    /// Choose an action for `state`
    fn choose_action(&mut self, state: &E::State) -> usize;

    /// Learn from a single transition
    ///
    /// **Errors** with [`Error::InvalidAction`] if the transition references an action
    /// outside of the action space
    fn learn(&mut self, exp: Exp<'_, E::State>) -> Result<()>;

    /// Forget everything learned so far
    fn reset(&mut self);
}

/// Configuration for the [`AgentLoop`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Number of episodes played by [`AgentLoop::score`], at least 1
    ///
    /// **Default**: `1`
    pub nb_episodes: usize,
    /// Call [`Environment::render`] before every step
    ///
    /// **Default**: `false`
    pub render: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            nb_episodes: 1,
            render: false,
        }
    }
}

fn ensure_episodes(nb_episodes: usize) -> Result<()> {
    if nb_episodes == 0 {
        return Err(Error::InvalidConfiguration {
            name: "nb_episodes".to_string(),
            reason: "Must be at least 1.".to_string(),
        });
    }
    Ok(())
}

/// Drives an [`Agent`] through episodes of an [`Environment`]
///
/// Each step the environment is stepped, the reward is accumulated, and the agent learns
/// from the transition. Learning persists across episodes and across [`score`](Self::score)
/// calls until [`reset`](Self::reset).
pub struct AgentLoop<E, A> {
    env: E,
    agent: A,
    config: LoopConfig,
    total_reward: f64,
    global_step: u64,
}

impl<E, A> AgentLoop<E, A>
where
    E: Environment,
    A: Agent<E>,
{
    /// Pair an agent with an environment
    ///
    /// **Errors** if `nb_episodes` is 0 or the agent and environment disagree on the
    /// size of the action space
    pub fn new(env: E, agent: A, config: LoopConfig) -> Result<Self> {
        ensure_episodes(config.nb_episodes)?;
        if agent.action_space_size() != env.action_space_size() {
            return Err(Error::InvalidConfiguration {
                name: "action_space_size".to_string(),
                reason: format!(
                    "Agent has {} actions but the environment has {}.",
                    agent.action_space_size(),
                    env.action_space_size()
                ),
            });
        }

        let mut this = Self {
            env,
            agent,
            config,
            total_reward: 0.0,
            global_step: 0,
        };
        this.reset();
        Ok(this)
    }

    /// Clear the agent's learned state, the lifetime reward and the step counter
    pub fn reset(&mut self) {
        self.total_reward = 0.0;
        self.global_step = 0;
        self.agent.reset();
    }

    /// Play a single episode, learning from every transition
    ///
    /// **Returns** the sum of rewards received during the episode
    ///
    /// The loop only ends when the environment reports `done`. Errors from the
    /// environment end the episode and are returned as they are.
    pub fn play_one_episode(&mut self) -> Result<f64> {
        let mut state = self.env.reset()?;
        let mut action = self.agent.choose_action(&state);
        let mut episode_reward = 0.0;

        loop {
            if self.config.render {
                self.env.render();
            }
            let Step {
                next_state,
                reward,
                done,
                ..
            } = self.env.step(action)?;
            trace!("step {}: action {} -> reward {}", self.global_step, action, reward);

            episode_reward += reward;
            self.total_reward += reward;

            if done {
                self.agent.learn(Exp {
                    state: &state,
                    action,
                    reward,
                    next_state: &next_state,
                    next_action: None,
                    done,
                })?;
                break;
            }

            let next_action = self.agent.choose_action(&next_state);
            self.agent.learn(Exp {
                state: &state,
                action,
                reward,
                next_state: &next_state,
                next_action: Some(next_action),
                done,
            })?;

            state = next_state;
            action = next_action;
            self.global_step += 1;
        }

        debug!("episode finished with reward {}", episode_reward);
        Ok(episode_reward)
    }

    /// Play `nb_episodes` episodes in a row without resetting in between
    ///
    /// **Returns** the sum of the episode rewards
    pub fn score(&mut self) -> Result<f64> {
        let mut total = 0.0;
        for _ in 0..self.config.nb_episodes {
            total += self.play_one_episode()?;
        }
        debug!("scored {} over {} episodes", total, self.config.nb_episodes);
        Ok(total)
    }

    /// Sum of every reward received since the last reset
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Number of non-terminal steps taken since the last reset
    pub fn global_step(&self) -> u64 {
        self.global_step
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Take back the environment and the agent
    pub fn into_parts(self) -> (E, A) {
        (self.env, self.agent)
    }
}

fn apply_param<A: Params>(
    config: &mut LoopConfig,
    agent: &mut A,
    name: &str,
    value: &ParamValue,
) -> Result<()> {
    match name {
        "nb_episodes" => {
            let nb_episodes = value.require_usize(name)?;
            ensure_episodes(nb_episodes)?;
            config.nb_episodes = nb_episodes;
        }
        "render" => config.render = value.require_bool(name)?,
        _ => agent.set_param(name, value)?,
    }
    Ok(())
}

impl<E, A> Params for AgentLoop<E, A>
where
    E: Environment,
    A: Agent<E> + Params,
{
    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        apply_param(&mut self.config, &mut self.agent, name, value)
    }
}

impl<E, A> Tunable for AgentLoop<E, A>
where
    E: Environment,
    A: Agent<E> + Params + Clone,
{
    /// Apply a whole combination, then reset
    ///
    /// Values are staged on a copy of the configuration and agent. If any of them is
    /// rejected, nothing is applied and the loop keeps its current state.
    fn set_params(&mut self, params: &ParamSet) -> Result<()> {
        let mut config = self.config.clone();
        let mut agent = self.agent.clone();
        for (name, value) in params.iter() {
            apply_param(&mut config, &mut agent, name, value)?;
        }
        self.config = config;
        self.agent = agent;
        self.reset();
        Ok(())
    }

    fn score(&mut self) -> Result<f64> {
        AgentLoop::score(self)
    }
}
