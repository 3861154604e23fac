/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

mod epsilon_greedy;

pub use epsilon_greedy::{greedy, EpsilonGreedy};
