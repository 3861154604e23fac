/// Error type produced by an [`Environment`]
///
/// The harness never inspects or retries these, it only forwards them to the caller.
pub type EnvError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The outcome of a single [`Environment::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S, I> {
    /// The state reached by taking the action
    pub next_state: S,
    /// The reward received for taking the action
    pub reward: f64,
    /// Whether `next_state` is terminal
    pub done: bool,
    /// Environment-specific diagnostics, ignored by the learning loop
    pub info: I,
}

/// Represents an episodic environment with a fixed, discrete action space.
///
/// Actions are indices in `[0, action_space_size)`. States are opaque to the
/// harness: they are only handed back to the agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// Additional information attached to every step
    type Info;

    /// Number of available actions, fixed for the lifetime of the environment
    fn action_space_size(&self) -> usize;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Result<Self::State, EnvError>;

    /// Update the environment in response to an action taken by an agent
    fn step(&mut self, action: usize) -> Result<Step<Self::State, Self::Info>, EnvError>;

    /// Draw the current state. Does nothing unless overridden.
    fn render(&self) {}
}
