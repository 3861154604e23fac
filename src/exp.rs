/// Represents a single experience or transition in the environment
///
/// States are borrowed from the learning loop, which keeps ownership of them
/// across steps.
#[derive(Debug)]
pub struct Exp<'a, S> {
    /// The state of the environment before taking the action
    pub state: &'a S,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f64,
    /// The state of the environment after the action is taken
    pub next_state: &'a S,
    /// The action chosen for `next_state`, or `None` if the transition is terminal
    pub next_action: Option<usize>,
    /// Whether `next_state` is terminal
    pub done: bool,
}

impl<S> Clone for Exp<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Exp<'_, S> {}
