pub mod k_armed_bandit;
pub mod windy_gridworld;

pub use k_armed_bandit::KArmedBandit;
pub use windy_gridworld::WindyGridworld;
